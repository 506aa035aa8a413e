use crate::domain::{Field, Record};
use crate::markup::escape;
use serde::Serialize;
use std::fmt::Write;

pub const NO_DATA_MESSAGE: &str = "No data available for display.";

/// Background of a group run. Alternates per group, never per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Shaded,
    Plain,
}

impl Tone {
    pub const fn for_group(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Shaded
        } else {
            Self::Plain
        }
    }

    pub const fn hex(self) -> &'static str {
        match self {
            Self::Shaded => "#F2F2F2",
            Self::Plain => "#FFFFFF",
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Shaded => (242, 242, 242),
            Self::Plain => (255, 255, 255),
        }
    }
}

/// A maximal run of consecutive rows sharing the group value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRun {
    pub value: String,
    pub rowspan: usize,
    pub tone: Tone,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "groups")]
pub enum GroupedTable {
    NoData,
    Groups(Vec<GroupRun>),
}

/// Groups pre-sorted rows into merged runs of `group_field`, one `detail_field`
/// cell per row.
pub fn render_grouped<R: Record>(
    rows: &[&R],
    group_field: Field,
    detail_field: Field,
) -> GroupedTable {
    let mut runs: Vec<GroupRun> = Vec::new();

    for row in rows {
        let value = row.field(group_field).unwrap_or_default();
        let detail = row.field(detail_field).unwrap_or_default().to_string();

        match runs.last_mut() {
            Some(run) if run.value == value => {
                run.rowspan += 1;
                run.details.push(detail);
            }
            _ => runs.push(GroupRun {
                value: value.to_string(),
                rowspan: 1,
                tone: Tone::for_group(runs.len()),
                details: vec![detail],
            }),
        }
    }

    if runs.is_empty() {
        GroupedTable::NoData
    } else {
        GroupedTable::Groups(runs)
    }
}

impl GroupedTable {
    pub fn groups(&self) -> &[GroupRun] {
        match self {
            Self::NoData => &[],
            Self::Groups(runs) => runs,
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::NoData)
    }

    pub fn row_count(&self) -> usize {
        self.groups().iter().map(|run| run.rowspan).sum()
    }

    /// HTML table with merged group cells and alternating group backgrounds
    pub fn to_html(&self, group_header: &str, detail_header: &str) -> String {
        const CELL: &str = "border: 1px solid black; padding: 8px; text-align: left;";

        let runs = match self {
            Self::NoData => return format!("<p>{NO_DATA_MESSAGE}</p>\n"),
            Self::Groups(runs) => runs,
        };

        let mut html = String::new();
        html.push_str("<table style='width:100%; border-collapse: collapse;'>\n");
        html.push_str("  <thead>\n");
        html.push_str(
            "    <tr style='background-color: #333333; color: white; font-weight: bold; border: 1px solid black;'>\n",
        );
        for header in [group_header, detail_header] {
            let _ = writeln!(
                html,
                "      <th style='text-align: center; padding: 8px; border: 1px solid black;'>{}</th>",
                escape(header)
            );
        }
        html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

        for run in runs {
            for (index, detail) in run.details.iter().enumerate() {
                let _ = write!(html, "    <tr style='background-color: {};'>", run.tone.hex());
                if index == 0 {
                    let _ = write!(
                        html,
                        "<td rowspan='{}' style='{CELL}'>{}</td>",
                        run.rowspan,
                        escape(&run.value)
                    );
                }
                let _ = writeln!(html, "<td style='{CELL}'>{}</td></tr>", escape(detail));
            }
        }

        html.push_str("  </tbody>\n</table>\n");
        html
    }
}
