/// Fixed circular order over `K` partitions.
#[derive(Debug, Clone)]
pub struct RoundRobin {
    cycle: Vec<u8>,
    num_parts: usize,
}

impl RoundRobin {
    /// Builds the cycle `0, 1, ..., K-1`.
    pub fn new(num_parts: u8) -> Self {
        let num_parts = usize::from(num_parts);
        let cycle = (0..num_parts)
            .chain(0..num_parts)
            .map(|k| k as u8)
            .collect();
        Self { cycle, num_parts }
    }

    /// Returns `K`.
    pub fn num_parts(&self) -> usize {
        self.num_parts
    }

    /// Yields every partition except `part`, starting right after it:
    /// `part+1, ..., K-1, 0, ..., part-1`.
    pub fn exclude(&self, part: u8) -> impl Iterator<Item = u8> + '_ {
        let start = usize::from(part) + 1;
        self.cycle[start..start + self.num_parts - 1].iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::RoundRobin;

    #[test]
    fn exclude_wraps_around() {
        let robin = RoundRobin::new(4);
        assert_eq!(robin.exclude(0).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(robin.exclude(2).collect::<Vec<_>>(), vec![3, 0, 1]);
        assert_eq!(robin.exclude(3).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(RoundRobin::new(2).exclude(1).collect::<Vec<_>>(), vec![0]);
    }
}
