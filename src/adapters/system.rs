use crate::domain::model::{
    CpuMetrics, DiskUsage, MemoryMetrics, MetricsSnapshot, TemperatureReading,
};
use crate::domain::ports::Collector;
use crate::utils::error::{Result, SysmonError};
use chrono::Utc;
use std::path::Path;
use std::sync::Mutex;
use sysinfo::{Components, Disks, RefreshKind, System};

/// Collects host metrics through sysinfo. The `System` handle is kept
/// across cycles so CPU usage is measured against the previous refresh.
pub struct HostCollector {
    system: Mutex<System>,
    disk_usage_paths: Vec<String>,
}

impl HostCollector {
    pub fn new(disk_usage_paths: Vec<String>) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());
        system.refresh_all();

        Self {
            system: Mutex::new(system),
            disk_usage_paths,
        }
    }

    fn memory(system: &System) -> MemoryMetrics {
        MemoryMetrics {
            total: system.total_memory(),
            used: system.used_memory(),
        }
    }

    fn cpu(system: &System) -> CpuMetrics {
        let load = System::load_average();
        // the first core's current frequency stands in for the package
        let frequency_mhz = system
            .cpus()
            .first()
            .map(|cpu| cpu.frequency() as f64)
            .unwrap_or(0.0);

        CpuMetrics {
            count: system.cpus().len() as u64,
            frequency_mhz,
            percent: system.global_cpu_usage() as f64,
            load_1: load.one,
            load_5: load.five,
            load_15: load.fifteen,
        }
    }

    fn temperatures() -> Vec<TemperatureReading> {
        let components = Components::new_with_refreshed_list();
        components
            .iter()
            .filter_map(|component| {
                component.temperature().map(|current| TemperatureReading {
                    sensor: component.label().to_string(),
                    label: None,
                    current: current as f64,
                })
            })
            .collect()
    }

    fn disk_usage(&self) -> Result<Vec<DiskUsage>> {
        let disks = Disks::new_with_refreshed_list();

        self.disk_usage_paths
            .iter()
            .map(|path| {
                let target = Path::new(path);
                // the disk whose mount point is the longest prefix of the path
                let disk = disks
                    .iter()
                    .filter(|disk| target.starts_with(disk.mount_point()))
                    .max_by_key(|disk| disk.mount_point().as_os_str().len())
                    .ok_or_else(|| SysmonError::CollectError {
                        message: format!("no mounted filesystem contains '{}'", path),
                    })?;

                let total = disk.total_space();
                let free = disk.available_space();
                let used = total.saturating_sub(free);
                let percent = if total > 0 {
                    used as f64 / total as f64 * 100.0
                } else {
                    0.0
                };

                Ok(DiskUsage {
                    path: path.clone(),
                    total,
                    used,
                    free,
                    percent,
                })
            })
            .collect()
    }
}

impl Collector for HostCollector {
    fn collect(&self) -> Result<MetricsSnapshot> {
        let mut system = self.system.lock().map_err(|_| SysmonError::CollectError {
            message: "system state lock poisoned".to_string(),
        })?;
        system.refresh_all();

        Ok(MetricsSnapshot {
            collected_at: Utc::now(),
            memory: Self::memory(&system),
            cpu: Self::cpu(&system),
            temperatures: Self::temperatures(),
            disks: self.disk_usage()?,
        })
    }
}
