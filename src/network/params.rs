//! Binary parameter file.
//!
//! Layout, all little-endian:
//!
//! ```text
//! i32      layer count
//! i32[]    node count per layer
//! f64[]    weights, layer → node → incoming edge (creation order)
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::network::network::Network;

impl Network {
    /// Writes the layer shape and every weight to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        log::debug!("saved {} weights to {}", self.edge_count(), path.display());
        Ok(())
    }

    /// Replaces this network with the one stored at `path`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        self.read_from(&mut reader)?;
        log::debug!(
            "loaded {:?} network with {} weights from {}",
            self.layer_sizes(),
            self.edge_count(),
            path.display()
        );
        Ok(())
    }

    /// Convenience constructor around [`Network::load`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Network> {
        let mut network = Network::new();
        network.load(path)?;
        Ok(network)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_count(writer, self.layer_count())?;
        for size in self.layer_sizes() {
            write_count(writer, size)?;
        }
        for edge in self.incoming_edges() {
            writer.write_all(&self.graph().edge(edge).weight.to_le_bytes())?;
        }
        Ok(())
    }

    /// Reads a stored network and swaps it in for this one.
    ///
    /// Every weight the header promises is read before any layer is built,
    /// so a truncated or corrupt stream leaves `self` untouched. The shape
    /// is taken from the stream as-is; callers that expect a particular
    /// input or output size must check it themselves.
    pub fn read_from<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        let layer_count = read_count(reader, "layer count")?;
        let mut sizes = Vec::with_capacity(layer_count.min(64));
        for i in 0..layer_count {
            sizes.push(read_count(reader, &format!("node count of layer {i}"))?);
        }
        let edges = stored_edge_count(&sizes)?;

        // Grows with the bytes actually present, not with the header's claim.
        let mut weights = Vec::with_capacity(edges.min(PREALLOC_WEIGHTS));
        let mut buf = [0u8; 8];
        for _ in 0..edges {
            reader.read_exact(&mut buf)?;
            weights.push(f64::from_le_bytes(buf));
        }

        let mut network = Network::with_layers(&sizes);
        network.set_weights(&weights)?;
        *self = network;
        Ok(())
    }
}

const PREALLOC_WEIGHTS: usize = 1 << 16;

/// `Σ n_i · n_(i+1)` over adjacent layers, or an error if it overflows.
fn stored_edge_count(sizes: &[usize]) -> Result<usize> {
    sizes.windows(2).try_fold(0usize, |total, pair| {
        pair[0]
            .checked_mul(pair[1])
            .and_then(|edges| total.checked_add(edges))
            .ok_or_else(|| {
                Error::InvalidParameterFile(format!("layer sizes {sizes:?} overflow the edge count"))
            })
    })
}

fn write_count<W: Write>(writer: &mut W, count: usize) -> Result<()> {
    let count = i32::try_from(count).map_err(|_| {
        Error::InvalidParameterFile(format!("count {count} does not fit in an i32"))
    })?;
    writer.write_all(&count.to_le_bytes())?;
    Ok(())
}

fn read_count<R: Read>(reader: &mut R, what: &str) -> Result<usize> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    let value = i32::from_le_bytes(buf);
    usize::try_from(value)
        .map_err(|_| Error::InvalidParameterFile(format!("{what} is negative ({value})")))
}
