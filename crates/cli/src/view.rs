use tabled::settings::Style;
use tabled::{Table, Tabled};
use wifitrack_api::models::{NetworkEntry, Speed};
use wifitrack_core::{TrackerSettings, TrackerSnapshot};

/// One tracked entry as a table row.
#[derive(Tabled)]
pub struct EntryRow {
    pub list: String,
    pub title: String,
    pub key: String,
    pub level: String,
    pub speed: String,
    pub status: String,
}

impl EntryRow {
    pub fn from_entry(list: &str, entry: &NetworkEntry) -> Self {
        let level = entry
            .level()
            .map(|l| format!("{l} dBm"))
            .unwrap_or_else(|| "-".to_string());
        let speed = match entry.speed {
            Speed::None => "-".to_string(),
            speed => format!("{speed:?}").to_lowercase(),
        };

        Self {
            list: list.to_string(),
            title: entry.title().to_string(),
            key: entry.identity.key(),
            level,
            speed,
            status: status(entry),
        }
    }
}

fn status(entry: &NetworkEntry) -> String {
    if let Some(connection) = &entry.connection {
        let mut status = "connected".to_string();
        if connection.validated {
            status.push_str(", validated");
        }
        if connection.default_route {
            status.push_str(", default");
        } else if connection.cellular_default_route {
            status.push_str(", cellular default");
        }
        return status;
    }
    match &entry.scan {
        Some(scan) if scan.roaming => "in range (roaming)".to_string(),
        Some(_) => "in range".to_string(),
        None => "out of range".to_string(),
    }
}

pub fn render_snapshot(label: &str, now_ms: u64, snapshot: &TrackerSnapshot) -> String {
    let rows: Vec<EntryRow> = snapshot
        .saved
        .iter()
        .map(|e| EntryRow::from_entry("saved", e))
        .chain(
            snapshot
                .subscriptions
                .iter()
                .map(|e| EntryRow::from_entry("subscription", e)),
        )
        .collect();

    let mut out = format!(
        "== {label} (t={now_ms} ms, wifi {:?}) ==\n",
        snapshot.wifi_state
    );
    if rows.is_empty() {
        out.push_str("(no entries)\n");
    } else {
        out.push_str(&Table::new(&rows).with(Style::psql()).to_string());
        out.push('\n');
    }
    out
}

#[derive(Tabled)]
pub struct SettingRow {
    pub setting: &'static str,
    pub value: String,
}

pub fn render_settings(settings: &TrackerSettings) -> String {
    let rows = vec![
        SettingRow {
            setting: "max_scan_age_ms",
            value: settings.max_scan_age_ms.to_string(),
        },
        SettingRow {
            setting: "scan_interval_ms",
            value: settings.scan_interval_ms.to_string(),
        },
        SettingRow {
            setting: "scan_retry_limit",
            value: settings.scan_retry_limit.to_string(),
        },
        SettingRow {
            setting: "verbose_logging",
            value: settings.verbose_logging.to_string(),
        },
        SettingRow {
            setting: "reducer",
            value: settings.reducer().name().to_string(),
        },
        SettingRow {
            setting: "order",
            value: settings.entry_order().name().to_string(),
        },
        SettingRow {
            setting: "scan window (normal)",
            value: format!("{} ms", settings.normal_window_ms()),
        },
        SettingRow {
            setting: "scan window (failed cycle)",
            value: format!("{} ms", settings.failed_window_ms()),
        },
    ];
    Table::new(rows).with(Style::psql()).to_string()
}
