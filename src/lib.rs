pub mod chunk;
pub mod combine;
pub mod config;
pub mod record;
pub mod sizing;

/// Worker count for a machine with `total_cores` CPUs: one core is left
/// free so the host stays responsive, with a floor of one worker.
pub fn worker_count(total_cores: usize) -> usize {
    total_cores.saturating_sub(1).max(1)
}
