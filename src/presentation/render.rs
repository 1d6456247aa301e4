// Region renderers: each one replaces its region of the page from a snapshot
use crate::domain::dashboard::{ClearanceSummary, DashboardStats};
use crate::domain::format::{escape_html, format_number, is_due_today};
use crate::domain::records::{Blotter, Resident};
use crate::presentation::page::{Page, StatCardId};
use chrono::NaiveDate;

pub const NO_RESIDENTS_ROW: &str = "<tr><td colspan=\"5\" class=\"empty\">No residents found</td></tr>";

pub const NO_BLOTTERS_ITEM: &str = "<li><div><div class=\"list-title\">No Open Cases</div><div class=\"list-sub\">All cases are currently resolved</div></div><span class=\"badge success\">Good!</span></li>";

pub fn render_statistics(page: &mut Page, stats: &DashboardStats) {
    for id in StatCardId::ALL {
        let (value, sub) = match id {
            StatCardId::Residents => (
                stats.total_residents,
                Some(format!("+{} this week", stats.new_residents_week.unwrap_or(0))),
            ),
            StatCardId::Households => (
                stats.total_households,
                Some(format!("+{} this week", stats.new_households_week.unwrap_or(0))),
            ),
            StatCardId::Blotters => (
                stats.active_blotters,
                Some(format!("{} due today", stats.blotters_due_today.unwrap_or(0))),
            ),
            StatCardId::Clearances => (stats.clearances_issued_month, None),
        };

        let card = page.stat_cards.entry(id).or_default();
        card.value = value.map(format_number).unwrap_or_else(|| "N/A".to_string());
        if sub.is_some() {
            card.sub = sub;
        }
    }
}

pub fn render_recent_residents(page: &mut Page, residents: &[Resident]) {
    page.recent_residents = if residents.is_empty() {
        vec![NO_RESIDENTS_ROW.to_string()]
    } else {
        residents.iter().map(resident_row).collect()
    };
}

pub fn render_open_blotters(page: &mut Page, blotters: &[Blotter], today: NaiveDate) {
    page.open_blotters = if blotters.is_empty() {
        vec![NO_BLOTTERS_ITEM.to_string()]
    } else {
        blotters.iter().map(|b| blotter_item(b, today)).collect()
    };
}

/// Updates the first two summary items in place; anything else is left alone.
pub fn render_clearance_summary(page: &mut Page, summary: &ClearanceSummary) {
    if let [first, second, ..] = page.clearance_summary.as_mut_slice() {
        first.sub = summary.sub_text();
        first.badge = summary.pending_badge();
        second.sub = summary.sub_text();
        second.badge = summary.processed_badge();
    }
}

pub fn resident_row(resident: &Resident) -> String {
    let address = escape_html(resident.address_label());
    format!(
        "<tr data-resident-id=\"{id}\"><td>{name}</td><td class=\"address-cell\" title=\"{address}\">{address}</td><td>{age}</td><td><span class=\"badge success\">{status}</span></td><td class=\"actions\"><a class=\"icon-btn\" href=\"{href}\">⋯</a></td></tr>",
        id = resident.id,
        name = escape_html(&resident.full_name()),
        age = escape_html(&resident.age_label()),
        status = escape_html(resident.status_label()),
        href = resident.profile_path(),
    )
}

pub fn blotter_item(blotter: &Blotter, today: NaiveDate) -> String {
    let location = blotter
        .location_label()
        .map(|l| format!(" · {}", escape_html(l)))
        .unwrap_or_default();
    let badge = if is_due_today(blotter.hearing_date.as_deref(), today) {
        "Due today"
    } else {
        "Open"
    };

    format!(
        "<li><div><div class=\"list-title\">{title}</div><div class=\"list-sub\">Reported by: {reporter}{location}</div></div><span class=\"badge warning\">{badge}</span></li>",
        title = escape_html(&blotter.case_title),
        reporter = escape_html(&blotter.reporter_name()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::Badge;
    use crate::domain::records::{Age, Reporter};
    use crate::presentation::layout::dashboard_page;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn resident(id: i64, first: &str) -> Resident {
        Resident {
            id,
            first_name: first.to_string(),
            last_name: "Cruz".to_string(),
            address: Some("Purok 3".to_string()),
            age: Some(Age::Years(30)),
            status: None,
        }
    }

    #[test]
    fn test_statistics_example() {
        let mut page = dashboard_page();
        let stats = DashboardStats {
            total_residents: Some(1500),
            new_residents_week: Some(12),
            ..Default::default()
        };
        render_statistics(&mut page, &stats);

        let residents = &page.stat_cards[&StatCardId::Residents];
        assert_eq!(residents.value, "1,500");
        assert_eq!(residents.sub.as_deref(), Some("+12 this week"));

        let households = &page.stat_cards[&StatCardId::Households];
        assert_eq!(households.value, "N/A");
        assert_eq!(households.sub.as_deref(), Some("+0 this week"));
        assert_eq!(page.stat_cards[&StatCardId::Blotters].sub.as_deref(), Some("0 due today"));
        assert_eq!(page.stat_cards[&StatCardId::Clearances].sub, None);
    }

    #[test]
    fn test_recent_residents_replace_previous_rows() {
        let mut page = dashboard_page();
        render_recent_residents(&mut page, &[resident(1, "Ana"), resident(2, "Ben")]);
        assert_eq!(page.recent_residents.len(), 2);

        render_recent_residents(&mut page, &[resident(3, "Carla")]);
        assert_eq!(page.recent_residents.len(), 1);
        assert!(page.recent_residents[0].contains("Carla Cruz"));
        assert!(!page.recent_residents.concat().contains("Ana"));

        render_recent_residents(&mut page, &[]);
        assert_eq!(page.recent_residents, vec![NO_RESIDENTS_ROW.to_string()]);
        assert!(page.recent_residents[0].contains("No residents found"));
    }

    #[test]
    fn test_resident_row_escapes_and_falls_back() {
        let row = resident_row(&Resident {
            id: 9,
            first_name: "<script>".to_string(),
            last_name: "X".to_string(),
            address: None,
            age: None,
            status: None,
        });

        assert!(row.contains("&lt;script&gt; X"));
        assert!(!row.contains("<script>"));
        assert!(row.contains("title=\"N/A\">N/A</td>"));
        assert!(row.contains("<td>N/A</td>"));
        assert!(row.contains(">Active</span>"));
        assert!(row.contains("href=\"/residents/9\""));
    }

    #[test]
    fn test_open_blotters() {
        let mut page = dashboard_page();
        let due = Blotter {
            id: Some(1),
            case_title: "Boundary dispute".to_string(),
            reported_by: Some(Reporter {
                first_name: "Lito".to_string(),
                last_name: "Santos".to_string(),
            }),
            location: Some("Purok 4".to_string()),
            hearing_date: Some("2026-10-19T15:00:00".to_string()),
        };
        let open = Blotter {
            id: Some(2),
            case_title: "Stray dog".to_string(),
            reported_by: None,
            location: None,
            hearing_date: None,
        };
        render_open_blotters(&mut page, &[due, open], today());

        assert_eq!(page.open_blotters.len(), 2);
        assert!(page.open_blotters[0].contains("Reported by: Lito Santos · Purok 4"));
        assert!(page.open_blotters[0].contains(">Due today</span>"));
        assert!(page.open_blotters[1].contains("Reported by: Anonymous</div>"));
        assert!(page.open_blotters[1].contains(">Open</span>"));

        render_open_blotters(&mut page, &[], today());
        assert_eq!(page.open_blotters.len(), 1);
        assert!(page.open_blotters[0].contains("No Open Cases"));
    }

    #[test]
    fn test_clearance_summary_example() {
        let mut page = dashboard_page();
        render_clearance_summary(&mut page, &ClearanceSummary::new(0, 3));

        assert_eq!(page.clearance_summary[0].badge, Badge::new("All Clear", "success"));
        assert_eq!(page.clearance_summary[1].badge, Badge::new("On track", "success"));
        assert_eq!(page.clearance_summary[0].sub, "Pending: 0 · Processed today: 3");
        assert_eq!(page.clearance_summary[0].title, "Barangay Clearance");
    }

    #[test]
    fn test_clearance_summary_needs_two_items() {
        let mut page = dashboard_page();
        page.clearance_summary.truncate(1);
        let before = page.clearance_summary.clone();

        render_clearance_summary(&mut page, &ClearanceSummary::new(5, 5));
        assert_eq!(page.clearance_summary, before);
    }
}
