use chrono::{DateTime, Local};
use colored::{ColoredString, Colorize};
use humansize::{format_size, BINARY};

use crate::core::system_monitor::{
    CpuMetric, GpuMetric, RamMetric, Severity, SeverityState, SystemMetrics,
};

/// Format a byte count in binary units (KiB, MiB, GiB)
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, BINARY)
}

/// `61.0°C`, or `n/a` for the unavailable sentinel
pub fn format_temperature(celsius: f32) -> String {
    if celsius < 0.0 {
        "n/a".to_string()
    } else {
        format!("{:.1}°C", celsius)
    }
}

/// Local wall-clock time of a sample (HH:MM:SS)
pub fn format_clock(time: DateTime<Local>) -> String {
    time.format("%H:%M:%S").to_string()
}

pub fn severity_label(severity: Severity) -> ColoredString {
    let label = severity.to_string();
    match severity {
        Severity::None => label.green(),
        Severity::Warning => label.yellow().bold(),
        Severity::Critical => label.red().bold(),
    }
}

fn cpu_line(cpu: &CpuMetric) -> String {
    format!(
        "{:>5.1}%  {:>8}  ({} cores)",
        cpu.usage_percent,
        format_temperature(cpu.temperature_celsius),
        cpu.core_count
    )
}

fn ram_line(ram: &RamMetric) -> String {
    format!(
        "{:>5.1}%  {} / {}",
        ram.usage_percent,
        format_bytes(ram.used_bytes),
        format_bytes(ram.total_bytes)
    )
}

fn gpu_line(gpu: &GpuMetric) -> String {
    let vram = if gpu.vram_total_bytes > 0 {
        format!(
            "  VRAM {} / {}",
            format_bytes(gpu.vram_used_bytes),
            format_bytes(gpu.vram_total_bytes)
        )
    } else {
        String::new()
    };

    format!(
        "{:>5.1}%  {:>8}  {} [{}]{}",
        gpu.usage_percent,
        format_temperature(gpu.temperature_celsius),
        gpu.name,
        gpu.vendor,
        vram
    )
}

/// Multi-line text rendering of one evaluated snapshot
pub fn format_snapshot(metrics: &SystemMetrics, severity: &SeverityState) -> String {
    let mut lines = vec![
        format!(
            "{} {}  {}",
            "CPU ".bold(),
            cpu_line(&metrics.cpu),
            severity_label(severity.cpu)
        ),
        format!(
            "{} {}  {}",
            "RAM ".bold(),
            ram_line(&metrics.ram),
            severity_label(severity.ram)
        ),
    ];

    if metrics.gpus.is_empty() {
        lines.push(format!("{} {}", "GPU ".bold(), "none detected".dimmed()));
    } else {
        for (index, gpu) in metrics.gpus.iter().enumerate() {
            lines.push(format!(
                "{} {}",
                format!("GPU{}", index).bold(),
                gpu_line(gpu)
            ));
        }
        lines.push(format!(
            "{} {}",
            "GPU ".bold(),
            severity_label(severity.gpu)
        ));
    }

    lines.join("\n")
}
