use crate::neon_filters::filter::Filter;

/// Luminance weights for the grayscale filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayscaleParams {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl GrayscaleParams {
    pub const DEFAULT_RED: f32 = 0.299;
    pub const DEFAULT_GREEN: f32 = 0.587;
    pub const DEFAULT_BLUE: f32 = 0.114;

    pub const MIN_COEFFICIENT: f32 = 0.0;
    pub const MAX_COEFFICIENT: f32 = 1.0;

    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    pub const fn with_red(self, red: f32) -> Self {
        Self { red, ..self }
    }

    pub const fn with_green(self, green: f32) -> Self {
        Self { green, ..self }
    }

    pub const fn with_blue(self, blue: f32) -> Self {
        Self { blue, ..self }
    }

    /// Snaps every coefficient into `[MIN_COEFFICIENT, MAX_COEFFICIENT]`.
    pub fn clamped(self) -> Self {
        let clamp = |c: f32| c.clamp(Self::MIN_COEFFICIENT, Self::MAX_COEFFICIENT);
        Self::new(clamp(self.red), clamp(self.green), clamp(self.blue))
    }
}

impl Default for GrayscaleParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RED, Self::DEFAULT_GREEN, Self::DEFAULT_BLUE)
    }
}

/// Channel offset for the brightness filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrightnessParams {
    pub delta: i32,
}

impl BrightnessParams {
    pub const DEFAULT_DELTA: i32 = 0;
    pub const MIN_DELTA: i32 = -100;
    pub const MAX_DELTA: i32 = 100;

    pub const fn new(delta: i32) -> Self {
        Self { delta }
    }

    pub const fn with_delta(self, delta: i32) -> Self {
        Self { delta }
    }

    pub fn clamped(self) -> Self {
        Self::new(self.delta.clamp(Self::MIN_DELTA, Self::MAX_DELTA))
    }

    /// An offset of zero leaves every pixel unchanged.
    pub const fn is_no_op(&self) -> bool {
        self.delta == 0
    }
}

/// Scale factor for the contrast filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastParams {
    pub factor: f32,
}

impl ContrastParams {
    pub const DEFAULT_FACTOR: f32 = 1.0;
    pub const MIN_FACTOR: f32 = 0.5;
    pub const MAX_FACTOR: f32 = 2.0;

    pub const fn new(factor: f32) -> Self {
        Self { factor }
    }

    pub const fn with_factor(self, factor: f32) -> Self {
        Self { factor }
    }

    pub fn clamped(self) -> Self {
        Self::new(self.factor.clamp(Self::MIN_FACTOR, Self::MAX_FACTOR))
    }

    /// A factor of exactly `1.0` leaves every pixel unchanged.
    pub fn is_no_op(&self) -> bool {
        self.factor == Self::DEFAULT_FACTOR
    }
}

impl Default for ContrastParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FACTOR)
    }
}

/// Parameters for the filters that have tunables
///
/// Values are plain `Copy` snapshots: updating one through the `with_*`
/// builders yields a new value and never affects copies handed out earlier.
///
/// # Examples
///
/// ```
/// use neon_filters::{BrightnessParams, Filter, FilterParams};
///
/// let params = FilterParams::Brightness(BrightnessParams::new(40));
/// assert_eq!(params.filter(), Filter::Brightness);
/// assert!(!params.is_no_op());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterParams {
    Grayscale(GrayscaleParams),
    Brightness(BrightnessParams),
    Contrast(ContrastParams),
}

impl FilterParams {
    /// Default parameters for `filter`, or `None` for filters without
    /// tunables.
    pub fn default_for(filter: Filter) -> Option<Self> {
        match filter {
            Filter::Grayscale => Some(Self::Grayscale(GrayscaleParams::default())),
            Filter::Brightness => Some(Self::Brightness(BrightnessParams::default())),
            Filter::Contrast => Some(Self::Contrast(ContrastParams::default())),
            Filter::Original | Filter::Invert | Filter::Sepia => None,
        }
    }

    /// The filter this parameter set belongs to.
    pub const fn filter(&self) -> Filter {
        match self {
            Self::Grayscale(_) => Filter::Grayscale,
            Self::Brightness(_) => Filter::Brightness,
            Self::Contrast(_) => Filter::Contrast,
        }
    }

    /// Returns `true` when these parameters make the filter an identity
    /// transform.
    pub fn is_no_op(&self) -> bool {
        match self {
            Self::Grayscale(_) => false,
            Self::Brightness(params) => params.is_no_op(),
            Self::Contrast(params) => params.is_no_op(),
        }
    }

    /// Snaps the values into their documented ranges.
    pub fn clamped(self) -> Self {
        match self {
            Self::Grayscale(params) => Self::Grayscale(params.clamped()),
            Self::Brightness(params) => Self::Brightness(params.clamped()),
            Self::Contrast(params) => Self::Contrast(params.clamped()),
        }
    }
}

impl From<GrayscaleParams> for FilterParams {
    fn from(params: GrayscaleParams) -> Self {
        Self::Grayscale(params)
    }
}

impl From<BrightnessParams> for FilterParams {
    fn from(params: BrightnessParams) -> Self {
        Self::Brightness(params)
    }
}

impl From<ContrastParams> for FilterParams {
    fn from(params: ContrastParams) -> Self {
        Self::Contrast(params)
    }
}

/// Default parameters for `filter`.
pub fn default_params(filter: Filter) -> Option<FilterParams> {
    FilterParams::default_for(filter)
}
