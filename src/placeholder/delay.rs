//! # Política de Delay
//! src/placeholder/delay.rs
//!
//! Parsea el parámetro `delay` y calcula cuánto esperar antes de responder.
//!
//! ## Formatos aceptados
//!
//! - `250` - espera fija de 250 ms
//! - `100-500` - espera aleatoria uniforme en [100, 500] ms (inclusive)
//!
//! La fuente de aleatoriedad se inyecta en `sample`, así que cada thread
//! puede usar su propio generador sin estado compartido.

use super::error::PlaceholderError;
use rand::Rng;
use std::time::Duration;

/// Separador de rangos en el parámetro `delay`
pub const RANGE_SEPARATOR: char = '-';

/// Delay máximo aceptado por defecto (1 minuto)
pub const DEFAULT_MAX_DELAY_MS: u64 = 60_000;

/// Delay artificial pedido por el cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelaySpec {
    /// Espera fija en milisegundos
    Fixed(u64),

    /// Espera aleatoria en el rango inclusivo [min, max] ms
    Range { min: u64, max: u64 },
}

impl DelaySpec {
    /// Parsea el valor de `delay`
    ///
    /// Retorna `Ok(None)` si el valor está vacío.
    ///
    /// # Ejemplo
    /// ```
    /// use placeholder_server::placeholder::delay::DelaySpec;
    ///
    /// assert_eq!(DelaySpec::parse("").unwrap(), None);
    /// assert_eq!(DelaySpec::parse("50").unwrap(), Some(DelaySpec::Fixed(50)));
    /// assert_eq!(
    ///     DelaySpec::parse("10-20").unwrap(),
    ///     Some(DelaySpec::Range { min: 10, max: 20 })
    /// );
    /// assert!(DelaySpec::parse("20-10").is_err());
    /// ```
    pub fn parse(spec: &str) -> Result<Option<Self>, PlaceholderError> {
        if spec.is_empty() {
            return Ok(None);
        }

        let parts: Vec<&str> = spec.split(RANGE_SEPARATOR).collect();
        match parts.as_slice() {
            [single] => Ok(Some(DelaySpec::Fixed(parse_millis(single, spec)?))),
            [min, max] => {
                let min = parse_millis(min, spec)?;
                let max = parse_millis(max, spec)?;
                if max < min {
                    return Err(PlaceholderError::InvalidDelayFormat(format!(
                        "{} (max must be >= min)",
                        spec
                    )));
                }
                Ok(Some(DelaySpec::Range { min, max }))
            }
            _ => Err(PlaceholderError::InvalidDelayFormat(spec.to_string())),
        }
    }

    /// Mayor espera posible en milisegundos
    pub fn max_millis(&self) -> u64 {
        match *self {
            DelaySpec::Fixed(ms) => ms,
            DelaySpec::Range { max, .. } => max,
        }
    }

    /// Obtiene la duración concreta a esperar
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let millis = match *self {
            DelaySpec::Fixed(ms) => ms,
            DelaySpec::Range { min, max } => rng.gen_range(min..=max),
        };
        Duration::from_millis(millis)
    }
}

/// Parsea y resuelve un delay en un solo paso
///
/// Un valor vacío resulta en una duración cero.
pub fn resolve<R: Rng + ?Sized>(spec: &str, rng: &mut R) -> Result<Duration, PlaceholderError> {
    Ok(DelaySpec::parse(spec)?
        .map(|delay| delay.sample(rng))
        .unwrap_or(Duration::ZERO))
}

fn parse_millis(value: &str, spec: &str) -> Result<u64, PlaceholderError> {
    value
        .parse::<u64>()
        .map_err(|_| PlaceholderError::InvalidDelayFormat(spec.to_string()))
}
