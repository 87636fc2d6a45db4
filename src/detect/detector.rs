use std::path::Path;

use crate::data::bitmap::{image_bytes_to_input, image_file_to_input, MNIST_SIDE};
use crate::error::{Error, Result};
use crate::network::labels::LabelNames;
use crate::network::network::Network;

/// Result of classifying one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub class: usize,
    pub label: String,
    /// Output layer values, one per class.
    pub outputs: Vec<f64>,
}

/// Inference front end: a trained network plus its class names.
pub struct Detector {
    network: Network,
    labels: LabelNames,
    side: u32,
}

impl Detector {
    /// Wraps an already built network. Fails unless the input layer matches
    /// a `side × side` image and, when names are given, the output layer has
    /// one node per name.
    pub fn new(network: Network, labels: LabelNames, side: u32) -> Result<Detector> {
        let sizes = network.layer_sizes();
        let pixels = (side as usize)
            .checked_mul(side as usize)
            .ok_or_else(|| Error::InvalidConfig(format!("image side {side} is too large")))?;
        let outputs = if labels.is_empty() {
            sizes.last().copied().unwrap_or(0)
        } else {
            labels.len()
        };

        let input_ok = sizes.first() == Some(&pixels);
        let output_ok = sizes.len() >= 2 && sizes.last() == Some(&outputs);
        if !input_ok || !output_ok {
            let mut expected = sizes.clone();
            if let Some(first) = expected.first_mut() {
                *first = pixels;
            }
            if let Some(last) = expected.last_mut() {
                *last = outputs;
            }
            if expected.len() < 2 {
                expected = vec![pixels, outputs];
            }
            return Err(Error::ShapeMismatch { expected, found: sizes });
        }
        Ok(Detector { network, labels, side })
    }

    /// Loads the parameter file and the label-name file written by training.
    pub fn from_files(parameters: impl AsRef<Path>, label_names: impl AsRef<Path>) -> Result<Detector> {
        let network = Network::from_file(parameters)?;
        let labels = LabelNames::load(label_names)?;
        Detector::new(network, labels, MNIST_SIDE)
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn labels(&self) -> &LabelNames {
        &self.labels
    }

    /// Classifies an already normalized input vector.
    pub fn detect(&mut self, input: &[f64]) -> Detection {
        self.network.forward(input);
        let class = self.network.predicted_class();
        Detection {
            class,
            label: self.labels.name(class),
            outputs: self.network.outputs(),
        }
    }

    pub fn detect_file(&mut self, path: impl AsRef<Path>, invert: bool) -> Result<Detection> {
        let input = image_file_to_input(path, self.side, invert)?;
        Ok(self.detect(&input))
    }

    pub fn detect_bytes(&mut self, bytes: &[u8], invert: bool) -> Result<Detection> {
        let input = image_bytes_to_input(bytes, self.side, invert)?;
        Ok(self.detect(&input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_input_size() {
        let network = Network::with_layers(&[10, 10]);
        let err = Detector::new(network, LabelNames::numeric(10), MNIST_SIDE).err().unwrap();
        match err {
            Error::ShapeMismatch { expected, found } => {
                assert_eq!(expected, vec![784, 10]);
                assert_eq!(found, vec![10, 10]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_label_count_mismatch() {
        let network = Network::with_layers(&[4, 3]);
        assert!(Detector::new(network, LabelNames::numeric(2), 2).is_err());
    }

    #[test]
    fn oversized_side_is_an_error() {
        let network = Network::with_layers(&[4, 2]);
        let result = Detector::new(network, LabelNames::numeric(2), u32::MAX);
        assert!(matches!(result, Err(Error::InvalidConfig(_)) | Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn rejects_single_layer_network() {
        let network = Network::with_layers(&[4]);
        assert!(Detector::new(network, LabelNames::default(), 2).is_err());
    }

    #[test]
    fn detection_names_the_strongest_output() {
        // 2×2 image → 2 classes; class 1 listens to the bottom row.
        let mut network = Network::with_layers(&[4, 2]);
        network.set_weights(&[
            5.0, 5.0, -5.0, -5.0, // into class 0
            -5.0, -5.0, 5.0, 5.0, // into class 1
        ]).unwrap();
        let mut detector =
            Detector::new(network, LabelNames::parse("top,bottom"), 2).unwrap();

        let detection = detector.detect(&[0.0, 0.0, 1.0, 1.0]);
        assert_eq!(detection.class, 1);
        assert_eq!(detection.label, "bottom");
        assert_eq!(detection.outputs.len(), 2);
        assert_eq!(detector.labels().len(), 2);
        assert_eq!(detector.network().layer_sizes(), vec![4, 2]);
    }

    #[test]
    fn loads_from_saved_files() {
        let dir = tempfile::tempdir().unwrap();
        let params = dir.path().join("Weight.dat");
        let labels = dir.path().join("Label.txt");
        Network::with_layers(&[784, 3, 10]).save(&params).unwrap();
        LabelNames::numeric(10).save(&labels).unwrap();

        let mut detector = Detector::from_files(&params, &labels).unwrap();
        // Zero weights: every output ties, so class 0 wins.
        let detection = detector.detect(&vec![0.5; 784]);
        assert_eq!(detection.class, 0);
        assert_eq!(detection.label, "0");
    }
}
