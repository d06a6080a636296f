use nalgebra::Vector3;

/// A single atomic site: an element symbol plus fractional coordinates.
///
/// Fractional coordinates are not wrapped at construction; periodic wrapping
/// happens where distances are computed.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    /// The chemical element symbol (e.g. "C", "Br").
    pub element: String,
    /// The fractional coordinates of the site in the parent lattice.
    pub frac: Vector3<f64>,
}

impl Site {
    pub fn new(element: &str, frac: Vector3<f64>) -> Self {
        Self {
            element: element.to_string(),
            frac,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_site_stores_element_and_coordinates() {
        let site = Site::new("Br", Vector3::new(0.1, 0.2, 0.3));
        assert_eq!(site.element, "Br");
        assert_eq!(site.frac, Vector3::new(0.1, 0.2, 0.3));
    }
}
