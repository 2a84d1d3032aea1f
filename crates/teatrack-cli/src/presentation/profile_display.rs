//! Profile and price history rendering.
//!
//! Each view is a `Display` wrapper so output is written with `?` into a
//! single formatter; the `render_*` helpers collect it into a `String`.

use std::fmt;

use teatrack_core::{PriceSnapshot, Profile, ProfileWithHistory};

use super::tables::{format_change, format_price, separator, truncate_string};

const TABLE_WIDTH: usize = 96;

/// The directory as a fixed-width table.
pub struct ProfileTable<'a>(pub &'a [Profile]);

impl fmt::Display for ProfileTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<5} {:<26} {:<20} {:<7} {:>10} {:<12} Contact",
            "ID", "Factory", "Owner", "Type", "Price/kg", "Effective"
        )?;
        writeln!(f, "{}", separator(TABLE_WIDTH))?;

        for p in self.0 {
            writeln!(
                f,
                "{:<5} {:<26} {:<20} {:<7} {:>10} {:<12} {}",
                p.id,
                truncate_string(&p.factory_name, 25),
                truncate_string(&p.owner_name, 19),
                p.commodity_type,
                format_price(p.price_per_kilo.value()),
                p.effective_date,
                p.contact_number
            )?;
        }
        Ok(())
    }
}

/// One profile with its history summary.
pub struct ProfileView<'a>(pub &'a ProfileWithHistory);

impl fmt::Display for ProfileView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let p = &view.profile;
        writeln!(f, "{} (#{})", p.factory_name, p.id)?;
        writeln!(f, "{}", separator(40))?;
        writeln!(f, "Owner:           {}", p.owner_name)?;
        writeln!(f, "Commodity:       {}", p.commodity_type)?;
        writeln!(f, "Price per kilo:  {}", format_price(p.price_per_kilo.value()))?;
        writeln!(f, "Effective date:  {}", p.effective_date)?;
        writeln!(f, "Contact:         {}", p.contact_number)?;
        writeln!(f, "Address:         {}", p.address)?;
        writeln!(f, "Operating hours: {}", p.operating_hours)?;
        writeln!(f, "Last updated:    {}", p.updated_at.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(f)?;

        let Some(s) = &view.summary else {
            return writeln!(f, "No price history recorded.");
        };
        writeln!(f, "Price history ({} entries)", view.history.len())?;
        writeln!(f, "  Change:  {}", format_change(s.change, s.change_percent))?;
        writeln!(f, "  Highest: {}", format_price(s.highest))?;
        writeln!(f, "  Lowest:  {}", format_price(s.lowest))?;
        writeln!(f, "  Average: {}", format_price(s.average))
    }
}

/// Snapshots one per line, oldest first.
pub struct HistoryLines<'a>(pub &'a [PriceSnapshot]);

impl fmt::Display for HistoryLines<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in self.0 {
            writeln!(
                f,
                "{}  {:>10}",
                s.recorded_at.format("%Y-%m-%d %H:%M:%S"),
                format_price(s.price.value())
            )?;
        }
        Ok(())
    }
}

pub fn render_profile_table(profiles: &[Profile]) -> String {
    ProfileTable(profiles).to_string()
}

pub fn render_profile(view: &ProfileWithHistory) -> String {
    ProfileView(view).to_string()
}

pub fn render_history(history: &[PriceSnapshot]) -> String {
    HistoryLines(history).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use teatrack_core::{CommodityType, PricePerKilo, PriceSummary, UserId};

    fn profile() -> Profile {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        Profile {
            id: 3,
            user_id: UserId::new("u1").unwrap(),
            factory_name: "Nilgiri Estates".to_string(),
            owner_name: "R. Kumar".to_string(),
            contact_number: "0423-555-0101".to_string(),
            address: "Coonoor".to_string(),
            commodity_type: CommodityType::Tea,
            price_per_kilo: PricePerKilo::new(320.0).unwrap(),
            effective_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            operating_hours: "8am - 5pm".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    fn snapshot(id: i64, price: f64, minute: u32) -> PriceSnapshot {
        PriceSnapshot {
            id,
            profile_id: 3,
            price: PricePerKilo::new(price).unwrap(),
            recorded_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, minute, 0).unwrap(),
        }
    }

    #[test]
    fn table_has_header_and_one_row_per_profile() {
        let table = render_profile_table(&[profile()]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[2].contains("Nilgiri Estates"));
        assert!(lines[2].contains("320.00"));
    }

    #[test]
    fn profile_view_includes_summary() {
        let history = vec![snapshot(1, 300.0, 0), snapshot(2, 320.0, 5)];
        let summary = PriceSummary::from_history(&history);
        let view = ProfileWithHistory {
            profile: profile(),
            history,
            summary,
        };

        let text = render_profile(&view);
        assert!(text.starts_with("Nilgiri Estates (#3)"));
        assert!(text.contains("Price history (2 entries)"));
        assert!(text.contains("+20.00 (+6.67%)"));
    }

    #[test]
    fn history_lines_are_in_given_order() {
        let text = render_history(&[snapshot(1, 300.0, 0), snapshot(2, 320.0, 5)]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("2024-05-01 09:00:00"));
        assert!(lines[1].ends_with("320.00"));
    }

    #[test]
    fn profile_without_history_says_so() {
        let view = ProfileWithHistory {
            profile: profile(),
            history: Vec::new(),
            summary: None,
        };

        let text = render_profile(&view);
        assert!(text.ends_with("\nNo price history recorded.\n"));
        assert!(!text.contains("Price history ("));
    }
}
