use fmpart_core::errors::FmError;
use fmpart_core::Netlist;

/// Checks that `part` assigns every module of `netlist` to a partition in
/// `0..num_parts`.
pub fn validate_assignment<N: Netlist>(
    netlist: &N,
    part: &[u8],
    num_parts: u8,
) -> Result<(), FmError> {
    if part.len() != netlist.num_modules() {
        return Err(FmError::partition(
            "assignment-length",
            "assignment must cover every module",
        )
        .with_context("expected", netlist.num_modules())
        .with_context("actual", part.len()));
    }
    if let Some((v, p)) = part.iter().enumerate().find(|(_, p)| **p >= num_parts) {
        return Err(
            FmError::partition("partition-out-of-range", "module assigned past the last partition")
                .with_context("module", v)
                .with_context("partition", p)
                .with_context("num_parts", num_parts),
        );
    }
    Ok(())
}

/// Connectivity cost `sum(weight * (spanned_partitions - 1))` over all nets.
///
/// Equals the cut weight for bipartitions.
pub fn cut_cost<N: Netlist>(netlist: &N, part: &[u8]) -> i64 {
    let mut seen: Vec<u8> = Vec::new();
    netlist
        .nets()
        .map(|net| {
            seen.clear();
            for w in netlist.incident_modules(net) {
                let p = part[w.index()];
                if !seen.contains(&p) {
                    seen.push(p);
                }
            }
            let spanned = seen.len().max(1) as i64;
            i64::from(netlist.net_weight(net)) * (spanned - 1)
        })
        .sum()
}

/// Returns the total module weight per partition.
pub fn part_weights<N: Netlist>(netlist: &N, part: &[u8], num_parts: u8) -> Vec<u64> {
    let mut weights = vec![0u64; usize::from(num_parts)];
    for v in netlist.modules() {
        weights[usize::from(part[v.index()])] += u64::from(netlist.module_weight(v));
    }
    weights
}
