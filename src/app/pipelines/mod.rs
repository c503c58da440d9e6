pub mod sysmon_pipeline;
