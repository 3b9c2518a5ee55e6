use std::fmt;

use chrono::{DateTime, TimeZone};

use crate::entity::Decision;

fn format_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    dt.format("%-m/%-d/%Y").to_string()
}

fn format_time<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    dt.format("%-I:%M:%S %p").to_string()
}

/// Render the decision log as Markdown.
///
/// Timestamps are shown in `now`'s time zone. Each decision becomes a
/// dated section followed by a horizontal rule.
pub fn render_markdown<Tz: TimeZone>(decisions: &[Decision], now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    let mut lines = vec![
        "# Decision Log".to_string(),
        String::new(),
        format!("*Exported from Breadcrumb on {}*", format_date(now)),
        String::new(),
    ];

    let tz = now.timezone();
    for d in decisions {
        let created = d.created_at_utc().with_timezone(&tz);
        lines.push(format!(
            "## {} at {}",
            format_date(&created),
            format_time(&created)
        ));
        lines.push(String::new());
        lines.push(format!("**Decision:** {}", d.decision));
        lines.push(String::new());
        lines.push(format!("**Context:** {}", d.context));
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn decision(text: &str, context: &str, created: DateTime<Utc>) -> Decision {
        Decision {
            id: text.to_lowercase(),
            decision: text.to_string(),
            context: context.to_string(),
            created_at: created.timestamp_millis(),
        }
    }

    #[test]
    fn test_empty_log() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let md = render_markdown(&[], &now);
        assert_eq!(
            md,
            "# Decision Log\n\n*Exported from Breadcrumb on 10/17/2026*\n"
        );
    }

    #[test]
    fn test_full_document() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let decisions = vec![
            decision(
                "Use Redis",
                "For caching",
                Utc.with_ymd_and_hms(2026, 10, 16, 15, 4, 5).unwrap(),
            ),
            decision(
                "Use Postgres",
                "",
                Utc.with_ymd_and_hms(2026, 1, 2, 0, 30, 0).unwrap(),
            ),
        ];

        let md = render_markdown(&decisions, &now);

        let expected = "# Decision Log\n\
                        \n\
                        *Exported from Breadcrumb on 10/17/2026*\n\
                        \n\
                        ## 10/16/2026 at 3:04:05 PM\n\
                        \n\
                        **Decision:** Use Redis\n\
                        \n\
                        **Context:** For caching\n\
                        \n\
                        ---\n\
                        \n\
                        ## 1/2/2026 at 12:30:00 AM\n\
                        \n\
                        **Decision:** Use Postgres\n\
                        \n\
                        **Context:** \n\
                        \n\
                        ---\n";
        assert_eq!(md, expected);
    }

    #[test]
    fn test_timestamps_follow_time_zone() {
        let offset = chrono::FixedOffset::west_opt(5 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let decisions = vec![decision(
            "Late call",
            "",
            Utc.with_ymd_and_hms(2026, 10, 17, 2, 0, 0).unwrap(),
        )];

        let md = render_markdown(&decisions, &now);
        assert!(md.contains("## 10/16/2026 at 9:00:00 PM"));
    }
}
