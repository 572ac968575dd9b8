//! Role flags attached to a resolved artifact.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Independent roles an artifact plays in a resolved graph.
    ///
    /// An artifact reached through several paths carries the union of the
    /// roles of every path. Resolution only ever adds bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct DependencyFlags: u32 {
        /// Declared optional by the project.
        const OPTIONAL = 1;
        /// Declared directly by the project.
        const DIRECT = 1 << 1;
        /// Part of the runtime classpath.
        const RUNTIME_CP = 1 << 2;
        /// Part of the build-time (deployment) classpath only.
        const DEPLOYMENT_CP = 1 << 3;
        /// The runtime piece of an extension.
        const RUNTIME_EXTENSION_ARTIFACT = 1 << 4;
        /// An extension runtime declared directly by the project.
        const TOP_LEVEL_RUNTIME_EXTENSION_ARTIFACT = 1 << 5;
    }
}

impl Default for DependencyFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl DependencyFlags {
    /// Union of `self` and `other`.
    pub fn merged(self, other: DependencyFlags) -> DependencyFlags {
        self | other
    }
}

impl fmt::Display for DependencyFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let names: Vec<&str> = self.iter_names().map(|(name, _)| name).collect();
        write!(f, "{}", names.join(" | "))
    }
}
