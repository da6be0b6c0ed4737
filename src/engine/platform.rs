// Mon Oct 19 2026 - Alex

use bitflags::bitflags;
use std::fmt;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CpuFeatures: u32 {
        const SSE42 = 1 << 0;
        const AVX2 = 1 << 1;
        const AVX512 = 1 << 2;
        const AVX512VBMI = 1 << 3;
        const NEON = 1 << 4;
    }
}

/// Capabilities of the host a database is built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    arch: &'static str,
    features: CpuFeatures,
    logical_cpus: usize,
}

impl Platform {
    pub fn new(arch: &'static str, features: CpuFeatures, logical_cpus: usize) -> Self {
        Self {
            arch,
            features,
            logical_cpus,
        }
    }

    /// Describes the machine this process is running on.
    pub fn populate() -> Self {
        Self {
            arch: std::env::consts::ARCH,
            features: detect_features(),
            logical_cpus: num_cpus::get(),
        }
    }

    pub fn arch(&self) -> &str {
        self.arch
    }

    pub fn features(&self) -> CpuFeatures {
        self.features
    }

    pub fn logical_cpus(&self) -> usize {
        self.logical_cpus
    }

    pub fn has(&self, feature: CpuFeatures) -> bool {
        self.features.contains(feature)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::populate()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.features.iter_names().map(|(name, _)| name).collect();
        if names.is_empty() {
            write!(f, "{} ({} cpus)", self.arch, self.logical_cpus)
        } else {
            write!(f, "{} [{}] ({} cpus)", self.arch, names.join(" "), self.logical_cpus)
        }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect_features() -> CpuFeatures {
    let mut features = CpuFeatures::empty();
    if std::arch::is_x86_feature_detected!("sse4.2") {
        features |= CpuFeatures::SSE42;
    }
    if std::arch::is_x86_feature_detected!("avx2") {
        features |= CpuFeatures::AVX2;
    }
    if std::arch::is_x86_feature_detected!("avx512bw") {
        features |= CpuFeatures::AVX512;
    }
    if std::arch::is_x86_feature_detected!("avx512vbmi") {
        features |= CpuFeatures::AVX512VBMI;
    }
    features
}

#[cfg(target_arch = "aarch64")]
fn detect_features() -> CpuFeatures {
    if std::arch::is_aarch64_feature_detected!("neon") {
        CpuFeatures::NEON
    } else {
        CpuFeatures::empty()
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn detect_features() -> CpuFeatures {
    CpuFeatures::empty()
}
