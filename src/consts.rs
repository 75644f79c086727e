// Runtime defaults (overridable from the command line)
pub const DEFAULT_THREADS: usize = 4;
pub const DEFAULT_OUT_FILE: &str = "./out.ppm";

// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Geometric threshold: degenerate denominators, parallel rays, shadow bias
pub const EPSILON: f64 = 0.00001;

// Maximum recursion depth for reflected and refracted rays
pub const MAX_BOUNCES: usize = 5;

// Common refraction indices
pub const VACUUM_RI: f64 = 1.0;
pub const AIR_RI: f64 = 1.00029;
pub const WATER_RI: f64 = 1.333;
pub const GLASS_RI: f64 = 1.52;
pub const DIAMOND_RI: f64 = 2.417;
