use kondi_core::coords::ArtifactCoords;
use kondi_core::dependency::{DeclaredDependency, Dependency, DependencyScope, DetailedDependency};

#[test]
fn dependency_scope_default_is_compile() {
    assert_eq!(DependencyScope::default(), DependencyScope::Compile);
}

#[test]
fn only_compile_and_runtime_are_transitive() {
    assert!(DependencyScope::Compile.is_transitive());
    assert!(DependencyScope::Runtime.is_transitive());
    assert!(!DependencyScope::Provided.is_transitive());
    assert!(!DependencyScope::Test.is_transitive());
}

#[test]
fn short_dependency_to_declared() {
    let dep = Dependency::Short("io.acme:lib:1.0".to_string());
    let declared = dep.to_declared().unwrap();
    assert_eq!(declared, DeclaredDependency::new(ArtifactCoords::new("io.acme", "lib", "1.0")));
}

#[test]
fn detailed_dependency_to_declared() {
    let dep = Dependency::Detailed(DetailedDependency {
        coords: "io.acme:lib:1.0".to_string(),
        scope: Some(DependencyScope::Runtime),
        optional: true,
    });
    let declared = dep.to_declared().unwrap();
    assert_eq!(declared.scope, DependencyScope::Runtime);
    assert!(declared.optional);
}

#[test]
fn invalid_short_dependency_fails() {
    let dep = Dependency::Short("not-a-coordinate".to_string());
    assert!(dep.to_declared().is_err());
}
