use std::collections::HashMap;

use shared::domain::{DayKey, ThemeId};

const VALENTINE_WEEK: [(u32, u32, &str); 8] = [
    (2, 3, "rose-day"),
    (2, 4, "propose-day"),
    (2, 5, "chocolate-day"),
    (2, 6, "teddy-day"),
    (2, 7, "promise-day"),
    (2, 8, "hug-day"),
    (2, 9, "kiss-day"),
    (2, 14, "valentines-day"),
];

/// Day key to theme lookup. A missing key simply means "no theme".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeTable {
    themes: HashMap<DayKey, ThemeId>,
}

impl ThemeTable {
    pub fn from_entries(entries: impl IntoIterator<Item = (DayKey, ThemeId)>) -> Self {
        Self {
            themes: entries.into_iter().collect(),
        }
    }

    pub fn lookup(&self, key: &DayKey) -> Option<&ThemeId> {
        self.themes.get(key)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeTable {
    fn default() -> Self {
        Self::from_entries(
            VALENTINE_WEEK
                .iter()
                .map(|(month, day, theme)| (DayKey::from_month_day(*month, *day), ThemeId::new(*theme))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_maps_eight_days() {
        let table = ThemeTable::default();
        assert_eq!(table.len(), 8);
        assert_eq!(
            table.lookup(&DayKey::from_month_day(2, 3)),
            Some(&ThemeId::new("rose-day"))
        );
        assert_eq!(
            table.lookup(&DayKey::from_month_day(2, 14)),
            Some(&ThemeId::new("valentines-day"))
        );
    }

    #[test]
    fn unmapped_days_have_no_theme() {
        let table = ThemeTable::default();
        assert_eq!(table.lookup(&DayKey::from_month_day(2, 10)), None);
        assert_eq!(table.lookup(&DayKey::from_month_day(3, 1)), None);
        let empty = ThemeTable::from_entries(Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.lookup(&DayKey::from_month_day(2, 3)), None);
    }
}
