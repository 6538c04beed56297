/// Floating point type used throughout system
pub type Real = f64;

/// Small magnitude used to guard mass-fraction ratios.
pub const SMALL: Real = 1e-15;

/// Density floor applied before any division by density [kg/m^3].
pub const RHO_MIN: Real = 1e-10;

/// Density with the vacuum floor applied.
#[inline]
pub fn floor_rho(rho: Real) -> Real {
    rho.max(RHO_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_floor() {
        assert_eq!(floor_rho(0.0), RHO_MIN);
        assert_eq!(floor_rho(-5.0), RHO_MIN);
        assert_eq!(floor_rho(1.2), 1.2);
    }
}
