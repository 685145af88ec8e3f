//! Per-host task summary
//!
//! Aggregates classified task records by host and renders the fixed-width
//! SUMMARY table followed by the backup / high-value data hints.

use std::collections::BTreeMap;

use crate::{output::ReportSink, record::TaskRecord};

const HOSTNAME_LABEL: &str = "HOSTNAME";
const PRIVILEGED_LABEL: &str = "PRIVILEGED_TASKS";
const NORMAL_LABEL: &str = "NORMAL_TASKS";
const TOTAL_LABEL: &str = "TOTAL";
const NOT_AVAILABLE: &str = "N/A";
const BANNER_WIDTH: usize = 60;

/// Task counters for a single host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCounts {
    pub privileged: u64,
    pub normal: u64,
}

impl HostCounts {
    pub fn total(&self) -> u64 {
        self.privileged + self.normal
    }

    fn add(&mut self, record: &TaskRecord) {
        if record.is_privileged() {
            self.privileged += 1;
        } else {
            self.normal += 1;
        }
    }
}

/// Host aggregates built from one pass over the records, ordered by hostname
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    hosts: BTreeMap<String, HostCounts>,
}

impl Summary {
    pub fn from_records(records: &[TaskRecord]) -> Self {
        let mut hosts: BTreeMap<String, HostCounts> = BTreeMap::new();
        for record in records {
            hosts.entry(record.host().to_string()).or_default().add(record);
        }
        Self { hosts }
    }

    /// Hosts in ascending lexicographic order
    pub fn hosts(&self) -> impl Iterator<Item = (&str, &HostCounts)> {
        self.hosts.iter().map(|(host, counts)| (host.as_str(), counts))
    }

    pub fn get(&self, host: &str) -> Option<&HostCounts> {
        self.hosts.get(host)
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn record_count(&self) -> u64 {
        self.totals().total()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn totals(&self) -> HostCounts {
        self.hosts.values().fold(HostCounts::default(), |acc, c| HostCounts {
            privileged: acc.privileged + c.privileged,
            normal: acc.normal + c.normal,
        })
    }

    /// Width of the hostname column: the label or the longest host, whichever is wider
    fn hostname_width(&self) -> usize {
        self.hosts
            .keys()
            .map(|h| h.chars().count())
            .chain(std::iter::once(HOSTNAME_LABEL.len()))
            .max()
            .unwrap_or(HOSTNAME_LABEL.len())
    }

    /// Write the table and hints. Nothing is written for an empty summary.
    pub fn render(&self, backup_dir: Option<&str>, has_hv_data: bool, sink: &mut dyn ReportSink) {
        if self.is_empty() {
            return;
        }

        let columns = Columns {
            host: self.hostname_width(),
            privileged: PRIVILEGED_LABEL.len(),
            normal: NORMAL_LABEL.len(),
        };
        let banner = "=".repeat(BANNER_WIDTH);

        sink.line("");
        sink.line(&banner);
        sink.line("SUMMARY");
        sink.line(&banner);

        let header = columns.row(HOSTNAME_LABEL, PRIVILEGED_LABEL, NORMAL_LABEL);
        let rule = "-".repeat(header.chars().count());
        sink.line(&header);
        sink.line(&rule);

        let privileged_cell = |count: u64| {
            if has_hv_data {
                count.to_string()
            } else {
                NOT_AVAILABLE.to_string()
            }
        };

        for (host, counts) in self.hosts() {
            sink.line(&columns.row(
                host,
                &privileged_cell(counts.privileged),
                &counts.normal.to_string(),
            ));
        }

        // a single host's totals would repeat its only row
        if self.host_count() > 1 {
            let totals = self.totals();
            sink.line(&rule);
            sink.line(&columns.row(
                TOTAL_LABEL,
                &privileged_cell(totals.privileged),
                &totals.normal.to_string(),
            ));
        }

        sink.line(&banner);

        if !has_hv_data {
            sink.good("NOTE: Privileged task detection requires --bh-data parameter");
            sink.good("Without high-value target data, privileged tasks are marked as N/A");
        }

        match backup_dir.filter(|dir| !dir.is_empty()) {
            Some(dir) => {
                sink.good(&format!("Raw XML files saved to: {}", dir));
                sink.good("Check the backup directory for detailed task information");
            }
            None => {
                sink.good("Check the output above or your saved files for detailed task information");
            }
        }

        sink.line("");

        tracing::debug!(
            hosts = self.host_count(),
            records = self.record_count(),
            has_hv_data,
            "rendered task summary"
        );
    }
}

/// Column widths of the summary table
struct Columns {
    host: usize,
    privileged: usize,
    normal: usize,
}

impl Columns {
    /// Cells are left-justified; wider content overflows rather than truncating.
    fn row(&self, host: &str, privileged: &str, normal: &str) -> String {
        format!(
            "{:<hw$} | {:<pw$} | {:<nw$}",
            host,
            privileged,
            normal,
            hw = self.host,
            pw = self.privileged,
            nw = self.normal
        )
    }
}

/// Aggregate `records` by host and render the summary into `sink`.
///
/// Empty input produces no output at all. Without high-value data every
/// privileged cell, totals included, shows `N/A`.
pub fn render_summary(
    records: &[TaskRecord],
    backup_dir: Option<&str>,
    has_hv_data: bool,
    sink: &mut dyn ReportSink,
) {
    if records.is_empty() {
        return;
    }

    Summary::from_records(records).render(backup_dir, has_hv_data, sink);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{CaptureSink, SinkEvent};

    fn scenario_records() -> Vec<TaskRecord> {
        vec![
            TaskRecord::new("A", "PRIV"),
            TaskRecord::new("A", "TASK"),
            TaskRecord::new("B", "PRIV"),
        ]
    }

    fn render(records: &[TaskRecord], backup_dir: Option<&str>, has_hv_data: bool) -> CaptureSink {
        let mut sink = CaptureSink::new();
        render_summary(records, backup_dir, has_hv_data, &mut sink);
        sink
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        assert!(render(&[], Some("/tmp/backup"), false).is_empty());
        assert!(render(&[], None, true).is_empty());
    }

    #[test]
    fn test_two_hosts_with_hv_data() {
        let sink = render(&scenario_records(), None, true);
        let banner = "=".repeat(60);
        let rule = "-".repeat(42);

        assert_eq!(
            sink.lines(),
            vec![
                "",
                banner.as_str(),
                "SUMMARY",
                banner.as_str(),
                "HOSTNAME | PRIVILEGED_TASKS | NORMAL_TASKS",
                rule.as_str(),
                "A        | 1                | 1           ",
                "B        | 1                | 0           ",
                rule.as_str(),
                "TOTAL    | 2                | 1           ",
                banner.as_str(),
                "",
            ]
        );
        assert_eq!(
            sink.notices(),
            vec!["Check the output above or your saved files for detailed task information"]
        );
    }

    #[test]
    fn test_two_hosts_without_hv_data() {
        let sink = render(&scenario_records(), None, false);
        let lines = sink.lines();

        assert_eq!(lines[6], "A        | N/A              | 1           ");
        assert_eq!(lines[7], "B        | N/A              | 0           ");
        assert_eq!(lines[9], "TOTAL    | N/A              | 1           ");
        assert_eq!(
            sink.notices(),
            vec![
                "NOTE: Privileged task detection requires --bh-data parameter",
                "Without high-value target data, privileged tasks are marked as N/A",
                "Check the output above or your saved files for detailed task information",
            ]
        );
    }

    #[test]
    fn test_notices_come_after_closing_banner() {
        let sink = render(&scenario_records(), Some("/loot/backup"), true);
        let banner = "=".repeat(60);
        let last_banner = sink
            .events
            .iter()
            .rposition(|e| *e == SinkEvent::Line(banner.clone()))
            .unwrap();
        let first_notice = sink
            .events
            .iter()
            .position(|e| matches!(e, SinkEvent::Good(_)))
            .unwrap();

        assert!(first_notice > last_banner);
        assert_eq!(sink.events.last(), Some(&SinkEvent::Line(String::new())));
    }

    #[test]
    fn test_single_host_omits_total_and_names_backup() {
        let records = vec![
            TaskRecord::new("DC01.corp.local", "PRIV"),
            TaskRecord::new("DC01.corp.local", "TASK"),
        ];
        let sink = render(&records, Some("/loot/backup"), true);

        assert!(!sink.lines().iter().any(|l| l.starts_with("TOTAL")));
        assert!(sink.lines().contains(&"DC01.corp.local | 1                | 1           "));
        assert_eq!(
            sink.notices(),
            vec![
                "Raw XML files saved to: /loot/backup",
                "Check the backup directory for detailed task information",
            ]
        );
    }

    #[test]
    fn test_empty_backup_dir_is_treated_as_absent() {
        let sink = render(&scenario_records(), Some(""), true);
        assert_eq!(
            sink.notices(),
            vec!["Check the output above or your saved files for detailed task information"]
        );
    }

    #[test]
    fn test_hostname_column_grows_with_longest_host() {
        let records = vec![
            TaskRecord::new("srv", "TASK"),
            TaskRecord::new("fileserver01.corp.local", "PRIV"),
        ];
        let sink = render(&records, None, true);
        let lines = sink.lines();

        let header = "HOSTNAME                | PRIVILEGED_TASKS | NORMAL_TASKS";
        assert_eq!(lines[4], header);
        assert_eq!(lines[5], "-".repeat(header.len()));
        assert_eq!(lines[6], "fileserver01.corp.local | 1                | 0           ");
        assert_eq!(lines[7], "srv                     | 0                | 1           ");
    }

    #[test]
    fn test_width_counts_chars_not_bytes() {
        let records = vec![TaskRecord::new("sérvéur-ünïcode", "TASK")];
        let sink = render(&records, None, true);
        let lines = sink.lines();

        assert_eq!(lines[4].chars().count(), lines[5].chars().count());
        assert_eq!(lines[6].chars().count(), lines[4].chars().count());
    }

    #[test]
    fn test_rows_sorted_and_counts_conserved() {
        let records = vec![
            TaskRecord::new("zeta", "PRIV"),
            TaskRecord::new("alpha", "TASK"),
            TaskRecord::new("Beta", "TASK"),
            TaskRecord::new("alpha", "PRIV"),
            TaskRecord::default(),
            TaskRecord::new("zeta", "SCHEDULED"),
            TaskRecord::new("zeta", "PRIV"),
        ];
        let summary = Summary::from_records(&records);

        let hosts: Vec<&str> = summary.hosts().map(|(h, _)| h).collect();
        assert_eq!(hosts, vec!["Beta", "Unknown", "alpha", "zeta"]);

        for (host, counts) in summary.hosts() {
            let expected = records.iter().filter(|r| r.host() == host).count() as u64;
            assert_eq!(counts.total(), expected, "host {}", host);
        }
        assert_eq!(summary.record_count(), records.len() as u64);
        assert_eq!(
            summary.get("zeta"),
            Some(&HostCounts {
                privileged: 2,
                normal: 1
            })
        );
        assert_eq!(
            summary.totals(),
            HostCounts {
                privileged: 3,
                normal: 4
            }
        );
    }

    #[test]
    fn test_overflowing_count_degrades_alignment() {
        let columns = Columns {
            host: 8,
            privileged: 16,
            normal: 12,
        };
        let row = columns.row("A", "1", "1234567890123");
        assert_eq!(row, "A        | 1                | 1234567890123");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let records = vec![TaskRecord::default(), TaskRecord::default()];
        let sink = render(&records, None, true);
        let lines = sink.lines();

        assert_eq!(lines[6], "Unknown  | 0                | 2           ");
        assert!(!lines.iter().any(|l| l.starts_with("TOTAL")));
    }
}
