//! Ordering for vulnerability identifiers.

use std::cmp::Ordering;

/// Compare vulnerability IDs such as `CVE-2024-5171` as structured
/// identifiers: IDs are split on `-` and corresponding parts compare
/// numerically when both are numbers, lexicographically otherwise. A shared
/// prefix orders before the longer ID, and IDs whose parts all compare equal
/// fall back to plain string order so the result is total.
pub fn cmp_vuln_id(a: &str, b: &str) -> Ordering {
    let parts_a: Vec<&str> = a.split('-').collect();
    let parts_b: Vec<&str> = b.split('-').collect();

    for (part_a, part_b) in parts_a.iter().zip(parts_b.iter()) {
        let ord = match (part_a.parse::<u64>(), part_b.parse::<u64>()) {
            (Ok(num_a), Ok(num_b)) => num_a.cmp(&num_b),
            _ => part_a.cmp(part_b),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    parts_a
        .len()
        .cmp(&parts_b.len())
        .then_with(|| a.cmp(b))
}
