use kondi_core::flags::DependencyFlags;

#[test]
fn default_flags_are_empty() {
    assert!(DependencyFlags::default().is_empty());
}

#[test]
fn merged_is_union() {
    let a = DependencyFlags::DIRECT;
    let b = DependencyFlags::RUNTIME_EXTENSION_ARTIFACT;
    let merged = a.merged(b);
    assert!(merged.contains(DependencyFlags::DIRECT));
    assert!(merged.contains(DependencyFlags::RUNTIME_EXTENSION_ARTIFACT));
}

#[test]
fn merged_never_clears_bits() {
    let full = DependencyFlags::DIRECT
        | DependencyFlags::RUNTIME_EXTENSION_ARTIFACT
        | DependencyFlags::TOP_LEVEL_RUNTIME_EXTENSION_ARTIFACT;
    assert_eq!(full.merged(DependencyFlags::empty()), full);
    assert_eq!(full.merged(DependencyFlags::DIRECT), full);
}

#[test]
fn display_lists_names() {
    let flags = DependencyFlags::DIRECT | DependencyFlags::RUNTIME_EXTENSION_ARTIFACT;
    assert_eq!(flags.to_string(), "DIRECT | RUNTIME_EXTENSION_ARTIFACT");
}

#[test]
fn display_empty_is_dash() {
    assert_eq!(DependencyFlags::empty().to_string(), "-");
}
