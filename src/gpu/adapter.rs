//! GPU adapter discovery and selection.

use std::fmt;

/// Result of matching a `--device` preference against enumerated adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterChoice {
    /// Index into the candidate list.
    pub index: usize,
    /// `true` if the preference matched this adapter's name.
    pub matched: bool,
}

/// Pick an adapter from `candidates`.
///
/// The first candidate whose name contains `preferred` (case-sensitive) wins.
/// Without a preference, or when nothing matches, the first candidate is
/// chosen with `matched == false`. Returns `None` for an empty list.
pub fn select_adapter<T>(
    candidates: &[T],
    name_of: impl Fn(&T) -> &str,
    preferred: Option<&str>,
) -> Option<AdapterChoice> {
    if candidates.is_empty() {
        return None;
    }
    let matched = preferred.and_then(|needle| {
        candidates
            .iter()
            .position(|candidate| name_of(candidate).contains(needle))
    });
    Some(matched.map_or(
        AdapterChoice {
            index: 0,
            matched: false,
        },
        |index| AdapterChoice {
            index,
            matched: true,
        },
    ))
}

/// Printable description of one adapter, for `--list-adapters`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSummary {
    /// Adapter name reported by the driver.
    pub name: String,
    /// PCI vendor id.
    pub vendor: u32,
    /// PCI device id.
    pub device: u32,
    /// Graphics backend (Vulkan, Metal, Dx12, Gl).
    pub backend: wgpu::Backend,
    /// Integrated, discrete, virtual, CPU, or other.
    pub device_type: wgpu::DeviceType,
    /// Driver name.
    pub driver: String,
    /// Driver version string.
    pub driver_info: String,
    /// Largest supported 2D texture dimension.
    pub max_texture_dimension_2d: u32,
    /// Largest supported buffer size in bytes.
    pub max_buffer_size: u64,
    /// Largest supported vertex buffer stride.
    pub max_vertex_buffer_array_stride: u32,
}

impl AdapterSummary {
    /// Build from adapter info and its limits.
    #[must_use]
    pub fn new(info: wgpu::AdapterInfo, limits: &wgpu::Limits) -> Self {
        Self {
            name: info.name,
            vendor: info.vendor,
            device: info.device,
            backend: info.backend,
            device_type: info.device_type,
            driver: info.driver,
            driver_info: info.driver_info,
            max_texture_dimension_2d: limits.max_texture_dimension_2d,
            max_buffer_size: limits.max_buffer_size,
            max_vertex_buffer_array_stride: limits.max_vertex_buffer_array_stride,
        }
    }
}

impl fmt::Display for AdapterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(
            f,
            "  vendor 0x{:04x}  device 0x{:04x}  backend {:?}  type {:?}",
            self.vendor, self.device, self.backend, self.device_type
        )?;
        writeln!(f, "  driver {} ({})", self.driver, self.driver_info)?;
        write!(
            f,
            "  max texture 2d {}  max buffer {} bytes  max vertex stride {}",
            self.max_texture_dimension_2d,
            self.max_buffer_size,
            self.max_vertex_buffer_array_stride
        )
    }
}

/// Describe a single adapter.
#[must_use]
pub fn describe(adapter: &wgpu::Adapter) -> AdapterSummary {
    AdapterSummary::new(adapter.get_info(), &adapter.limits())
}

/// Describe every adapter the instance can see, in enumeration order.
#[must_use]
pub fn list_adapters(instance: &wgpu::Instance) -> Vec<AdapterSummary> {
    instance
        .enumerate_adapters(wgpu::Backends::all())
        .iter()
        .map(describe)
        .collect()
}
