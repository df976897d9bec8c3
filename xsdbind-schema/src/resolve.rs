//! Reference resolver: the second compilation pass.
//!
//! After every class exists, discovers ID-based references (cells that
//! hold IDs, and fields following the `<base>_id` convention) and marks
//! each target class. Resolution must run after inference finishes: a
//! class declared later in the schema may be the target of a class
//! declared earlier.

use crate::error::{CompileError, ResolutionError};
use crate::ir::{CellKind, Package, fix_name};

/// Resolves all ID-based references in the package, marking target
/// classes in place.
///
/// Marking is idempotent: a class referenced from several sources is
/// marked once and appears once in the package's reference-target set.
///
/// # Errors
/// Returns `CompileError` when a referenced class name cannot be found,
/// naming both the target and the referencing class.
pub fn resolve(package: &mut Package) -> Result<(), CompileError> {
    // First pass: collect (referencing class, target name) pairs so the
    // second pass can mutate classes freely.
    let mut references: Vec<(String, String)> = Vec::new();
    for class in &package.classes {
        if let Some(CellKind::Reference(target)) = &class.cell_kind {
            references.push((class.name.clone(), target.clone()));
        }
        for var in &class.vars {
            if let Some(base) = &var.reference {
                references.push((class.name.clone(), base.clone()));
            }
        }
    }

    for (source, target) in references {
        mark_reference_target(package, &source, &target)?;
    }
    Ok(())
}

fn mark_reference_target(
    package: &mut Package,
    source: &str,
    target: &str,
) -> Result<(), CompileError> {
    let name = fix_name(target);
    let Some(index) = package.classes.iter().position(|class| class.name == name) else {
        return Err(ResolutionError {
            target: target.to_string(),
            class: source.to_string(),
        }
        .into());
    };

    if !package.classes[index].referenced {
        tracing::debug!(class = %name, key = target, "marking reference target");
        package.classes[index].referenced = true;
        package.classes[index].ref_name = Some(target.to_string());
        package.referenced_classes.push(name);
    }
    Ok(())
}
