//! Content fingerprint (`catalog_revision`) for one stack's index.
//!
//! The revision is a blake3 digest over every input that contributes to an
//! index: the stack name, the baseline rules text, the selection catalog
//! text, and each component's relative path and content. Entries are
//! length-prefixed and labelled, so moving bytes between two entries always
//! changes the digest. Component entries are sorted by path first, so the
//! revision does not depend on directory enumeration order.

/// Inputs to [`catalog_revision`].
#[derive(Debug, Clone, Copy)]
pub struct RevisionInputs<'a> {
    pub stack: &'a str,
    pub baseline: &'a str,
    pub catalog: &'a str,
    /// `(relative path, content)` pairs in any order.
    pub components: &'a [(String, String)],
}

/// Compute the hex-encoded revision for a set of inputs.
pub fn catalog_revision(inputs: &RevisionInputs<'_>) -> String {
    let mut components: Vec<&(String, String)> = inputs.components.iter().collect();
    components.sort_by(|a, b| a.0.cmp(&b.0));

    let mut hasher = blake3::Hasher::new();
    update_entry(&mut hasher, "stack", inputs.stack);
    update_entry(&mut hasher, "baseline", inputs.baseline);
    update_entry(&mut hasher, "catalog", inputs.catalog);
    for (path, content) in components {
        update_entry(&mut hasher, "component-path", path);
        update_entry(&mut hasher, "component-content", content);
    }

    hasher.finalize().to_hex().to_string()
}

fn update_entry(hasher: &mut blake3::Hasher, label: &str, value: &str) {
    hasher.update(label.as_bytes());
    hasher.update(b":");
    hasher.update(value.len().to_string().as_bytes());
    hasher.update(b":");
    hasher.update(value.as_bytes());
    hasher.update(b"\n\n");
}

// ============================================================================
// Tests
// ============================================================================
