//! Pretty-printed Stats report. The counters themselves live in
//! `accumulon_core::Stats`; this module owns the human-readable surface
//! over them, colored the way the original simulator's console report was.

use accumulon_core::Stats;
use colored::Colorize;

pub fn print_report(stats: &Stats) {
    println!("{}", "=== simulation report ===".bold());
    println!("cycles:          {}", stats.total_cycles);
    println!("instructions:    {}", stats.total_instructions);
    println!("IPC:             {:.4}", stats.ipc());
    println!(
        "cache hits/miss: {} / {}  ({}%)",
        stats.cache_hits.to_string().green(),
        stats.cache_misses.to_string().red(),
        format!("{:.1}", stats.hit_rate_pct())
    );
    println!("MPKI:            {:.3}", stats.mpki());
    println!("AMAT:            {:.3} cycles", stats.amat());
    println!("bus wait cycles: {}", stats.bus_wait_cycles);
    if stats.irq_count > 0 {
        println!(
            "IRQs:            {} (avg latency {:.2} cycles)",
            stats.irq_count,
            stats.avg_irq_latency()
        );
    } else {
        println!("IRQs:            0");
    }
    println!("cpu bytes moved: {}", stats.cpu_bytes_copied);
}
