//! Named-dimension arrays: time-varying variables and reduced spatial fields.

use std::collections::BTreeMap;

use ndarray::{ArrayD, ArrayViewD, Axis};

/// One variable of a gridded series: an N-dimensional array with named
/// dimensions and free-form string attributes.
#[derive(Debug, Clone)]
pub struct DataVariable {
    dims: Vec<String>,
    data: ArrayD<f64>,
    attrs: BTreeMap<String, String>,
}

impl DataVariable {
    /// Creates a new variable. Dimension names are matched against the
    /// series axes when the variable is added to a [`GriddedSeries`](crate::GriddedSeries).
    pub fn new<S: AsRef<str>>(dims: &[S], data: ArrayD<f64>) -> Self {
        Self {
            dims: dims.iter().map(|d| d.as_ref().to_string()).collect(),
            data,
            attrs: BTreeMap::new(),
        }
    }

    /// Returns this variable with an attribute set.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Returns this variable with its attributes replaced.
    pub fn with_attrs(mut self, attrs: BTreeMap<String, String>) -> Self {
        self.attrs = attrs;
        self
    }

    /// Dimension names, one per array axis.
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// The underlying array.
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Consumes the variable and returns its array.
    pub fn into_data(self) -> ArrayD<f64> {
        self.data
    }

    /// Attributes.
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    /// Looks up an attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Array axis position of a named dimension.
    pub fn axis_of(&self, dim: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == dim)
    }

    /// Selects index 0 (the surface level) along `depth_dim`, dropping that
    /// dimension. Returns an unchanged copy if the dimension is absent.
    pub fn surface(&self, depth_dim: &str) -> Self {
        match self.axis_of(depth_dim) {
            Some(axis) => {
                let mut dims = self.dims.clone();
                dims.remove(axis);
                Self {
                    dims,
                    data: self.data.index_axis(Axis(axis), 0).to_owned(),
                    attrs: self.attrs.clone(),
                }
            }
            None => self.clone(),
        }
    }
}

/// A reduced field without a time dimension (for example a climatology
/// statistic per grid cell).
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    dims: Vec<String>,
    values: ArrayD<f64>,
}

impl Field {
    /// Creates a new field.
    pub fn new(dims: Vec<String>, values: ArrayD<f64>) -> Self {
        Self { dims, values }
    }

    /// Dimension names, one per array axis.
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// Field values.
    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    /// Read-only view of the values.
    pub fn view(&self) -> ArrayViewD<'_, f64> {
        self.values.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn axis_lookup() {
        let v = DataVariable::new(&["time", "lat", "lon"], ArrayD::zeros(IxDyn(&[2, 3, 4])));
        assert_eq!(v.axis_of("lat"), Some(1));
        assert_eq!(v.axis_of("depth"), None);
    }

    #[test]
    fn surface_drops_depth() {
        let data = ArrayD::from_shape_fn(IxDyn(&[2, 3, 4]), |ix| (ix[0] * 100 + ix[1] * 10 + ix[2]) as f64);
        let v = DataVariable::new(&["time", "depth", "lat"], data).with_attr("units", "degC");
        let s = v.surface("depth");
        assert_eq!(s.dims(), &["time".to_string(), "lat".to_string()]);
        assert_eq!(s.data().shape(), &[2, 4]);
        assert_eq!(s.data()[[1, 3]], 103.0);
        assert_eq!(s.attr("units"), Some("degC"));
    }

    #[test]
    fn surface_without_depth_is_identity() {
        let v = DataVariable::new(&["time"], ArrayD::zeros(IxDyn(&[3])));
        let s = v.surface("depth");
        assert_eq!(s.dims(), v.dims());
    }
}
