//! Age-windowed cache of the latest observation per access point.

use std::collections::HashMap;

use wifitrack_api::models::ScanObservation;

/// Latest observation per bssid, plus the time of the last bulk refresh.
#[derive(Debug, Default)]
pub struct ScanCache {
    records: HashMap<String, ScanObservation>,
    last_refresh_ms: Option<u64>,
    retention_ms: u64,
}

impl ScanCache {
    pub fn new(retention_ms: u64) -> Self {
        Self {
            records: HashMap::new(),
            last_refresh_ms: None,
            retention_ms,
        }
    }

    /// Merge a batch of observations and evict everything past retention.
    ///
    /// An incoming observation replaces the cached one for its bssid only when
    /// it is at least as new, so an out-of-order batch never rolls a key back.
    pub fn update(&mut self, observations: impl IntoIterator<Item = ScanObservation>, now_ms: u64) {
        for observation in observations {
            match self.records.get(&observation.bssid) {
                Some(existing) if existing.timestamp_ms > observation.timestamp_ms => {}
                _ => {
                    self.records.insert(observation.bssid.clone(), observation);
                }
            }
        }
        self.last_refresh_ms = Some(now_ms);
        self.evict(now_ms);
    }

    fn evict(&mut self, now_ms: u64) {
        let retention = self.retention_ms;
        self.records.retain(|_, o| o.age_ms(now_ms) <= retention);
    }

    /// Observations no older than `window_ms`, ordered by ssid then bssid.
    pub fn query(&self, now_ms: u64, window_ms: u64) -> Vec<ScanObservation> {
        let mut fresh: Vec<ScanObservation> = self
            .records
            .values()
            .filter(|o| o.age_ms(now_ms) <= window_ms)
            .cloned()
            .collect();
        fresh.sort_by(|a, b| a.ssid.cmp(&b.ssid).then_with(|| a.bssid.cmp(&b.bssid)));
        fresh
    }

    pub fn last_refresh_ms(&self) -> Option<u64> {
        self.last_refresh_ms
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.last_refresh_ms = None;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Collapses the observations that map to one identity into what the entry keeps.
pub trait ScanReducer: Send + Sync {
    fn reduce(&self, observations: Vec<ScanObservation>) -> Vec<ScanObservation>;

    fn name(&self) -> &'static str;
}

/// Keep every observation, strongest first.
#[derive(Debug, Default, Clone, Copy)]
pub struct RetainAll;

impl ScanReducer for RetainAll {
    fn reduce(&self, mut observations: Vec<ScanObservation>) -> Vec<ScanObservation> {
        observations.sort_by(|a, b| strongest_first(a, b));
        observations
    }

    fn name(&self) -> &'static str {
        "retain_all"
    }
}

/// Keep only the strongest observation.
#[derive(Debug, Default, Clone, Copy)]
pub struct BestSignal;

impl ScanReducer for BestSignal {
    fn reduce(&self, observations: Vec<ScanObservation>) -> Vec<ScanObservation> {
        observations
            .into_iter()
            .min_by(strongest_first)
            .into_iter()
            .collect()
    }

    fn name(&self) -> &'static str {
        "best_signal"
    }
}

// Stronger level, then newer timestamp, then bssid.
fn strongest_first(a: &ScanObservation, b: &ScanObservation) -> std::cmp::Ordering {
    b.level
        .cmp(&a.level)
        .then_with(|| b.timestamp_ms.cmp(&a.timestamp_ms))
        .then_with(|| a.bssid.cmp(&b.bssid))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(ssid: &str, bssid: &str, level: i32, timestamp_ms: u64) -> ScanObservation {
        ScanObservation {
            ssid: ssid.to_string(),
            bssid: bssid.to_string(),
            level,
            frequency_mhz: 2412,
            capabilities: "[WPA2-PSK-CCMP][ESS]".to_string(),
            timestamp_ms,
        }
    }

    #[test]
    fn test_query_respects_window_boundary() {
        let mut cache = ScanCache::new(1_000);
        cache.update(vec![obs("Home", "aa", -50, 100)], 100);

        assert_eq!(cache.query(160, 60).len(), 1);
        assert!(cache.query(161, 60).is_empty());
    }

    #[test]
    fn test_future_timestamps_count_as_fresh() {
        let mut cache = ScanCache::new(1_000);
        cache.update(vec![obs("Home", "aa", -50, 500)], 100);
        assert_eq!(cache.query(100, 0).len(), 1);
    }

    #[test]
    fn test_refresh_supersedes_per_key() {
        let mut cache = ScanCache::new(1_000);
        cache.update(vec![obs("Home", "aa", -70, 100)], 100);
        cache.update(vec![obs("Home", "aa", -40, 200)], 200);

        let fresh = cache.query(200, 1_000);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].level, -40);
        assert_eq!(cache.last_refresh_ms(), Some(200));
    }

    #[test]
    fn test_older_observation_does_not_roll_back() {
        let mut cache = ScanCache::new(1_000);
        cache.update(vec![obs("Home", "aa", -40, 200)], 200);
        cache.update(vec![obs("Home", "aa", -90, 150)], 210);

        assert_eq!(cache.query(210, 1_000)[0].level, -40);
    }

    #[test]
    fn test_update_evicts_past_retention() {
        let mut cache = ScanCache::new(100);
        cache.update(vec![obs("Old", "aa", -50, 0)], 0);
        cache.update(vec![obs("New", "bb", -50, 150)], 150);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.query(150, 1_000)[0].ssid, "New");
    }

    #[test]
    fn test_reducers() {
        let batch = vec![
            obs("Home", "aa", -70, 100),
            obs("Home", "bb", -40, 100),
            obs("Home", "cc", -40, 120),
        ];

        let all = RetainAll.reduce(batch.clone());
        let order: Vec<_> = all.iter().map(|o| o.bssid.as_str()).collect();
        assert_eq!(order, vec!["cc", "bb", "aa"]);

        let best = BestSignal.reduce(batch);
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].bssid, "cc");

        assert!(BestSignal.reduce(Vec::new()).is_empty());
    }
}
