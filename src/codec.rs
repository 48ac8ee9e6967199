//! # Domain Codec
//!
//! Maps genotypes (bitstrings) to phenotypes (real vectors) and back.
//!
//! Each dimension of the search domain is discretized into `2^bits` evenly
//! spaced levels, where `bits = ceil(log2((upper - lower) / precision))`.
//! A chromosome is the concatenation of one most-significant-bit-first
//! slice per dimension.
//!
//! ## Example
//!
//! ```rust
//! use bitga::codec::{chromosome_length, Codec, SearchDomain};
//!
//! assert_eq!(chromosome_length(-2.0, 2.0, 0.01).unwrap(), 9);
//!
//! let codec = Codec::new(SearchDomain::new(-2.0, 2.0, 0.01).unwrap(), 1).unwrap();
//! assert_eq!(codec.decode_chromosome(&[false; 9]), vec![-2.0]);
//! assert_eq!(codec.decode_chromosome(&[true; 9]), vec![2.0]);
//! ```

use crate::error::{configuration_error, Result};
use crate::evolution::Challenge;
use crate::objective::Objective;
use crate::population::Population;

/// Widest slice whose integer levels are all exactly representable as `f64`.
pub const MAX_BITS_PER_DIMENSION: usize = f64::MANTISSA_DIGITS as usize;

/// The bounded, discretized real interval shared by every dimension.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "DomainBounds", into = "DomainBounds")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchDomain {
    lower_bound: f64,
    upper_bound: f64,
    precision: f64,
}

impl SearchDomain {
    /// Creates a validated search domain.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the bounds are not finite, if
    /// `upper_bound <= lower_bound`, or if `precision` is not a positive
    /// finite number.
    pub fn new(lower_bound: f64, upper_bound: f64, precision: f64) -> Result<Self> {
        validate_bounds(lower_bound, upper_bound, precision)?;
        Ok(Self {
            lower_bound,
            upper_bound,
            precision,
        })
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Number of bits needed to encode one dimension of this domain.
    pub fn bits_per_dimension(&self) -> Result<usize> {
        chromosome_length(self.lower_bound, self.upper_bound, self.precision)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct DomainBounds {
    lower_bound: f64,
    upper_bound: f64,
    precision: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<DomainBounds> for SearchDomain {
    type Error = crate::error::GeneticError;

    fn try_from(raw: DomainBounds) -> Result<Self> {
        Self::new(raw.lower_bound, raw.upper_bound, raw.precision)
    }
}

#[cfg(feature = "serde")]
impl From<SearchDomain> for DomainBounds {
    fn from(domain: SearchDomain) -> Self {
        Self {
            lower_bound: domain.lower_bound,
            upper_bound: domain.upper_bound,
            precision: domain.precision,
        }
    }
}

fn validate_bounds(lower_bound: f64, upper_bound: f64, precision: f64) -> Result<()> {
    if !lower_bound.is_finite() || !upper_bound.is_finite() {
        return Err(configuration_error(format!(
            "Search domain bounds must be finite, got [{}, {}]",
            lower_bound, upper_bound
        )));
    }
    if upper_bound <= lower_bound {
        return Err(configuration_error(format!(
            "Upper bound ({}) must be greater than lower bound ({})",
            upper_bound, lower_bound
        )));
    }
    if !(precision.is_finite() && precision > 0.0) {
        return Err(configuration_error(format!(
            "Precision must be a positive number, got {}",
            precision
        )));
    }
    Ok(())
}

/// Number of bits needed to represent `(upper_bound - lower_bound) / precision`
/// levels, that is `ceil(log2(range / precision))`.
///
/// # Errors
///
/// Returns a configuration error for degenerate bounds or precision, when
/// the precision is coarser than the range (fewer than one bit), or when a
/// dimension would need more than [`MAX_BITS_PER_DIMENSION`] bits.
pub fn chromosome_length(lower_bound: f64, upper_bound: f64, precision: f64) -> Result<usize> {
    validate_bounds(lower_bound, upper_bound, precision)?;

    let bits = ((upper_bound - lower_bound) / precision).log2().ceil();
    if !(bits >= 1.0) {
        return Err(configuration_error(format!(
            "Precision {} is too coarse for the range [{}, {}]",
            precision, lower_bound, upper_bound
        )));
    }
    if bits > MAX_BITS_PER_DIMENSION as f64 {
        return Err(configuration_error(format!(
            "Precision {} needs {} bits per dimension, at most {} are supported",
            precision, bits, MAX_BITS_PER_DIMENSION
        )));
    }
    Ok(bits as usize)
}

/// Number of real dimensions of the objective with the given identifier.
///
/// # Errors
///
/// Returns a configuration error for unknown identifiers.
pub fn dimensions(function_id: u8) -> Result<usize> {
    Ok(Objective::from_id(function_id)?.dimensions())
}

/// Decodes every row of `population` into a real vector of `dims` values.
///
/// # Errors
///
/// Returns a configuration error if the population width is not
/// `dims * bits_per_dim` or the domain is degenerate.
pub fn decode(
    population: &Population,
    dims: usize,
    bits_per_dim: usize,
    lower_bound: f64,
    upper_bound: f64,
) -> Result<Vec<Vec<f64>>> {
    if bits_per_dim == 0 || bits_per_dim > MAX_BITS_PER_DIMENSION {
        return Err(configuration_error(format!(
            "Bits per dimension must be in 1..={}, got {}",
            MAX_BITS_PER_DIMENSION, bits_per_dim
        )));
    }
    if upper_bound <= lower_bound {
        return Err(configuration_error(format!(
            "Upper bound ({}) must be greater than lower bound ({})",
            upper_bound, lower_bound
        )));
    }
    if population.chromosome_length() != dims * bits_per_dim {
        return Err(configuration_error(format!(
            "Population width ({}) doesn't match {} dimension(s) of {} bits",
            population.chromosome_length(),
            dims,
            bits_per_dim
        )));
    }

    Ok(population
        .iter()
        .map(|row| decode_row(row, bits_per_dim, lower_bound, upper_bound))
        .collect())
}

fn decode_row(row: &[bool], bits_per_dim: usize, lower_bound: f64, upper_bound: f64) -> Vec<f64> {
    let max_level = max_level(bits_per_dim);
    row.chunks_exact(bits_per_dim)
        .map(|slice| interpolate(to_integer(slice), max_level, lower_bound, upper_bound))
        .collect()
}

fn max_level(bits: usize) -> u64 {
    (1u64 << bits) - 1
}

/// MSB-first unsigned integer value of a bit slice.
fn to_integer(slice: &[bool]) -> u64 {
    slice
        .iter()
        .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit))
}

/// Linear interpolation written so that level `0` yields `lower_bound` and
/// level `max_level` yields `upper_bound` bit for bit.
fn interpolate(level: u64, max_level: u64, lower_bound: f64, upper_bound: f64) -> f64 {
    let t = level as f64 / max_level as f64;
    lower_bound * (1.0 - t) + upper_bound * t
}

/// The genotype layout of one run: a search domain, a dimension count and
/// the bit width derived from the domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Codec {
    domain: SearchDomain,
    dimensions: usize,
    bits_per_dimension: usize,
}

impl Codec {
    /// Creates a codec for `dimensions` copies of `domain`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `dimensions` is zero or the domain
    /// cannot be encoded.
    pub fn new(domain: SearchDomain, dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(configuration_error("A codec needs at least one dimension"));
        }
        Ok(Self {
            domain,
            dimensions,
            bits_per_dimension: domain.bits_per_dimension()?,
        })
    }

    pub fn domain(&self) -> &SearchDomain {
        &self.domain
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn bits_per_dimension(&self) -> usize {
        self.bits_per_dimension
    }

    /// Total number of bits in a chromosome.
    pub fn chromosome_length(&self) -> usize {
        self.dimensions * self.bits_per_dimension
    }

    /// Decodes one chromosome.
    ///
    /// The chromosome is expected to be [`Codec::chromosome_length`] bits
    /// long; trailing bits beyond the last full dimension are ignored.
    pub fn decode_chromosome(&self, chromosome: &[bool]) -> Vec<f64> {
        decode_row(
            chromosome,
            self.bits_per_dimension,
            self.domain.lower_bound,
            self.domain.upper_bound,
        )
    }

    /// Decodes every chromosome of `population`.
    pub fn decode(&self, population: &Population) -> Result<Vec<Vec<f64>>> {
        decode(
            population,
            self.dimensions,
            self.bits_per_dimension,
            self.domain.lower_bound,
            self.domain.upper_bound,
        )
    }

    /// Encodes a real vector as the chromosome of its nearest levels.
    ///
    /// Values outside the domain are clamped to the bounds.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `values` has the wrong dimensionality
    /// or contains NaN.
    pub fn encode(&self, values: &[f64]) -> Result<Vec<bool>> {
        if values.len() != self.dimensions {
            return Err(configuration_error(format!(
                "Expected {} value(s), got {}",
                self.dimensions,
                values.len()
            )));
        }

        let max_level = max_level(self.bits_per_dimension);
        let range = self.domain.upper_bound - self.domain.lower_bound;
        let mut chromosome = Vec::with_capacity(self.chromosome_length());

        for &value in values {
            if value.is_nan() {
                return Err(configuration_error("Cannot encode NaN"));
            }
            let t = ((value - self.domain.lower_bound) / range).clamp(0.0, 1.0);
            let level = (t * max_level as f64).round() as u64;
            chromosome.extend(
                (0..self.bits_per_dimension)
                    .rev()
                    .map(|shift| (level >> shift) & 1 == 1),
            );
        }

        Ok(chromosome)
    }
}
