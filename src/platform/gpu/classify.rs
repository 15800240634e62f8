//! Vendor classification for devices found in an OS display registry.

use crate::core::system_monitor::GpuVendor;

pub const PCI_VENDOR_APPLE: u32 = 0x106b;
pub const PCI_VENDOR_AMD: u32 = 0x1002;
pub const PCI_VENDOR_NVIDIA: u32 = 0x10de;
pub const PCI_VENDOR_INTEL: u32 = 0x8086;

const APPLE_GPU_NAME: &str = "Apple GPU";

/// One display device as reported by the registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Driver/vendor class string, e.g. `AGXAcceleratorG13G` or `sppci_vendor_Apple`
    pub class_name: String,
    pub model: String,
    pub vendor_id: Option<u32>,
    /// Dedicated VRAM; 0 for unified memory
    pub vram_bytes: u64,
}

#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// A word of the class name, compared case-insensitively
    ClassWord(&'static str),
    /// A word of the class name starting with this prefix (`AGXAcceleratorG13G`)
    ClassWordPrefix(&'static str),
    /// A word of the model name, compared case-insensitively
    ModelWord(&'static str),
    VendorId(u32),
}

#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub matcher: Matcher,
    pub vendor: GpuVendor,
}

const fn rule(matcher: Matcher, vendor: GpuVendor) -> ClassificationRule {
    ClassificationRule { matcher, vendor }
}

/// Checked top to bottom; the first match decides the vendor.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    rule(Matcher::ClassWordPrefix("agx"), GpuVendor::Apple),
    rule(Matcher::ClassWord("apple"), GpuVendor::Apple),
    rule(Matcher::ClassWord("amd"), GpuVendor::Amd),
    rule(Matcher::ClassWord("ati"), GpuVendor::Amd),
    rule(Matcher::ClassWord("nvidia"), GpuVendor::Nvidia),
    rule(Matcher::ClassWord("geforce"), GpuVendor::Nvidia),
    rule(Matcher::ClassWord("intel"), GpuVendor::Intel),
    rule(Matcher::ModelWord("apple"), GpuVendor::Apple),
    rule(Matcher::ModelWord("m1"), GpuVendor::Apple),
    rule(Matcher::ModelWord("m2"), GpuVendor::Apple),
    rule(Matcher::ModelWord("m3"), GpuVendor::Apple),
    rule(Matcher::ModelWord("m4"), GpuVendor::Apple),
    rule(Matcher::ModelWord("amd"), GpuVendor::Amd),
    rule(Matcher::ModelWord("radeon"), GpuVendor::Amd),
    rule(Matcher::ModelWord("nvidia"), GpuVendor::Nvidia),
    rule(Matcher::ModelWord("geforce"), GpuVendor::Nvidia),
    rule(Matcher::ModelWord("intel"), GpuVendor::Intel),
    rule(Matcher::VendorId(PCI_VENDOR_APPLE), GpuVendor::Apple),
    rule(Matcher::VendorId(PCI_VENDOR_AMD), GpuVendor::Amd),
    rule(Matcher::VendorId(PCI_VENDOR_NVIDIA), GpuVendor::Nvidia),
    rule(Matcher::VendorId(PCI_VENDOR_INTEL), GpuVendor::Intel),
];

/// Alphanumeric runs of `text`; `sppci_vendor_amd` yields `sppci`, `vendor`, `amd`.
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
}

fn has_word(text: &str, needle: &str) -> bool {
    words(text).any(|word| word.eq_ignore_ascii_case(needle))
}

fn has_word_prefix(text: &str, prefix: &str) -> bool {
    words(text).any(|word| {
        word.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

impl Matcher {
    fn matches(&self, entry: &RegistryEntry) -> bool {
        match *self {
            Matcher::ClassWord(needle) => has_word(&entry.class_name, needle),
            Matcher::ClassWordPrefix(prefix) => has_word_prefix(&entry.class_name, prefix),
            Matcher::ModelWord(needle) => has_word(&entry.model, needle),
            Matcher::VendorId(id) => entry.vendor_id == Some(id),
        }
    }
}

/// Vendor of a registry entry; `Unknown` when no rule matches.
pub fn classify(entry: &RegistryEntry) -> GpuVendor {
    classify_with(CLASSIFICATION_RULES, entry)
}

pub fn classify_with(rules: &[ClassificationRule], entry: &RegistryEntry) -> GpuVendor {
    rules
        .iter()
        .find(|rule| rule.matcher.matches(entry))
        .map(|rule| rule.vendor)
        .unwrap_or(GpuVendor::Unknown)
}

fn has_apple_marker(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    ["apple", "m1", "m2", "m3", "m4"]
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Display name for an Apple-integrated GPU.
///
/// Bare accelerator class names collapse to `Apple GPU`; anything without an
/// Apple or M-series marker is wrapped as `Apple <name> GPU`.
pub fn normalize_apple_name(raw: &str) -> String {
    let name = raw.trim();
    match name {
        "" | "AGXAccelerator" | "AGXAcceleratorG13G" | "AGXAcceleratorG14G" => {
            APPLE_GPU_NAME.to_string()
        }
        _ if has_apple_marker(name) => name.to_string(),
        _ => format!("Apple {} GPU", name),
    }
}

/// Parse registry VRAM strings such as `8 GB` or `1536 MB`.
pub fn parse_vram(value: &str) -> Option<u64> {
    let mut parts = value.split_whitespace();
    let amount: u64 = parts.next()?.parse().ok()?;
    let multiplier: u64 = match parts.next().map(|unit| unit.to_ascii_uppercase()) {
        Some(unit) if unit == "GB" => 1024 * 1024 * 1024,
        Some(unit) if unit == "MB" => 1024 * 1024,
        Some(unit) if unit == "KB" => 1024,
        None => 1,
        Some(_) => return None,
    };
    amount.checked_mul(multiplier)
}
