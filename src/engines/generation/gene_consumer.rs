use super::genome::BitString;

/// Sequentially consumes fixed-width genes from a bit string
pub struct GeneConsumer<'a> {
    bits: &'a [bool],
    width: usize,
    position: usize,
}

impl<'a> GeneConsumer<'a> {
    pub fn new(bits: &'a BitString, width: usize) -> Self {
        Self {
            bits: bits.bits(),
            width,
            position: 0,
        }
    }

    /// Consume the next whole gene, most significant bit first.
    /// Returns `None` once fewer than `width` bits remain.
    pub fn consume(&mut self) -> Option<u32> {
        if self.width == 0 || self.position + self.width > self.bits.len() {
            return None;
        }

        let gene = self.bits[self.position..self.position + self.width]
            .iter()
            .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit));
        self.position += self.width;
        Some(gene)
    }
}

impl Iterator for GeneConsumer<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        self.consume()
    }
}
