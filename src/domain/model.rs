use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single field value in a metrics point. InfluxDB distinguishes
/// integer and float fields, so the distinction is kept here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryMetrics {
    pub total: u64,
    pub used: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuMetrics {
    pub count: u64,
    pub frequency_mhz: f64,
    pub percent: f64,
    pub load_1: f64,
    pub load_5: f64,
    pub load_15: f64,
}

/// One temperature sensor reading. `label` distinguishes readings within
/// a sensor group when the platform reports one (e.g. a per-core label).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub sensor: String,
    pub label: Option<String>,
    pub current: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskUsage {
    pub path: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
}

/// Everything collected in one sampling cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub collected_at: DateTime<Utc>,
    pub memory: MemoryMetrics,
    pub cpu: CpuMetrics,
    pub temperatures: Vec<TemperatureReading>,
    pub disks: Vec<DiskUsage>,
}

impl MetricsSnapshot {
    /// Flatten the snapshot into ordered `(name, value)` fields for a
    /// single point. Temperature readings are numbered within their
    /// sensor group; spaces in sensor names and labels become
    /// underscores so field names stay unescaped on the wire.
    pub fn flatten(&self) -> Vec<(String, FieldValue)> {
        let mut fields = vec![
            (
                "memory_total".to_string(),
                FieldValue::Integer(self.memory.total as i64),
            ),
            (
                "memory_used".to_string(),
                FieldValue::Integer(self.memory.used as i64),
            ),
            (
                "cpu_count".to_string(),
                FieldValue::Integer(self.cpu.count as i64),
            ),
            (
                "cpu_frequency".to_string(),
                FieldValue::Float(self.cpu.frequency_mhz),
            ),
            ("cpu_percent".to_string(), FieldValue::Float(self.cpu.percent)),
            ("cpu_load_1".to_string(), FieldValue::Float(self.cpu.load_1)),
            ("cpu_load_5".to_string(), FieldValue::Float(self.cpu.load_5)),
            ("cpu_load_15".to_string(), FieldValue::Float(self.cpu.load_15)),
        ];

        let mut per_sensor: HashMap<&str, usize> = HashMap::new();
        for reading in &self.temperatures {
            let index = per_sensor.entry(reading.sensor.as_str()).or_insert(0);
            let label_part = reading
                .label
                .as_deref()
                .filter(|l| !l.is_empty())
                .map(|l| format!("_{}", l.replace(' ', "_")))
                .unwrap_or_default();
            let name = format!(
                "{}{}_{}_current",
                reading.sensor.replace(' ', "_"),
                label_part,
                index
            );
            fields.push((name, FieldValue::Float(reading.current)));
            *index += 1;
        }

        for disk in &self.disks {
            fields.push((
                format!("disk_usage_{}_total", disk.path),
                FieldValue::Integer(disk.total as i64),
            ));
            fields.push((
                format!("disk_usage_{}_used", disk.path),
                FieldValue::Integer(disk.used as i64),
            ));
            fields.push((
                format!("disk_usage_{}_free", disk.path),
                FieldValue::Integer(disk.free as i64),
            ));
            fields.push((
                format!("disk_usage_{}_percent", disk.path),
                FieldValue::Float(disk.percent),
            ));
        }

        fields
    }
}
