//! Trip profitability: revenue, operating costs and corporate tax.
//!
//! All costs are in PLN. Freight may be quoted in EUR, in which case it is
//! converted with the caller's exchange rate before any comparison.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default corporate income tax rate (Poland).
pub const DEFAULT_CIT_RATE: f64 = 0.19;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckProfile {
    pub name: String,
    pub plate: String,
    pub power_hp: u32,
    pub consumption_l_per_100km: f64,
    pub toll_rate_per_km: f64,
    pub maintenance_rate_per_km: f64,
}

impl Default for TruckProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            plate: String::new(),
            power_hp: 450,
            consumption_l_per_100km: 34.0,
            toll_rate_per_km: 0.40,
            maintenance_rate_per_km: 0.65,
        }
    }
}

/// How the freight price is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Freight {
    /// Lump sum for the whole trip.
    Total(f64),
    /// Rate per kilometre.
    PerKm(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Currency {
    Pln,
    /// PLN per EUR.
    Eur { exchange_rate: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripCostInput {
    pub distance_km: f64,
    pub freight: Freight,
    pub currency: Currency,
    /// PLN per litre.
    pub fuel_price: f64,
    pub cit_rate: f64,
    pub truck: TruckProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripCosts {
    pub revenue: f64,
    pub fuel_cost: f64,
    pub toll_cost: f64,
    pub maintenance_cost: f64,
    pub total_ops_cost: f64,
    pub gross_profit: f64,
    pub cit_cost: f64,
    pub net_profit: f64,
    pub net_per_km: f64,
    /// Revenue at which gross profit is zero.
    pub break_even: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    #[error("{field} must be a finite non-negative number, got {value}")]
    InvalidInput { field: &'static str, value: f64 },
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, CostError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CostError::InvalidInput { field, value })
    }
}

impl TripCostInput {
    fn validate(&self) -> Result<(), CostError> {
        non_negative("distance_km", self.distance_km)?;
        match self.freight {
            Freight::Total(value) => non_negative("freight", value)?,
            Freight::PerKm(value) => non_negative("freight_per_km", value)?,
        };
        if let Currency::Eur { exchange_rate } = self.currency {
            non_negative("exchange_rate", exchange_rate)?;
        }
        non_negative("fuel_price", self.fuel_price)?;
        non_negative("cit_rate", self.cit_rate)?;
        non_negative("consumption_l_per_100km", self.truck.consumption_l_per_100km)?;
        non_negative("toll_rate_per_km", self.truck.toll_rate_per_km)?;
        non_negative("maintenance_rate_per_km", self.truck.maintenance_rate_per_km)?;
        Ok(())
    }
}

pub fn calculate_trip_costs(input: &TripCostInput) -> Result<TripCosts, CostError> {
    input.validate()?;
    let distance = input.distance_km;

    let raw_revenue = match input.freight {
        Freight::Total(value) => value,
        Freight::PerKm(rate) => distance * rate,
    };
    let revenue = match input.currency {
        Currency::Pln => raw_revenue,
        Currency::Eur { exchange_rate } => raw_revenue * exchange_rate,
    };

    let fuel_cost = distance / 100.0 * input.truck.consumption_l_per_100km * input.fuel_price;
    let toll_cost = distance * input.truck.toll_rate_per_km;
    let maintenance_cost = distance * input.truck.maintenance_rate_per_km;
    let total_ops_cost = fuel_cost + toll_cost + maintenance_cost;

    let gross_profit = revenue - total_ops_cost;
    let cit_cost = if gross_profit > 0.0 {
        gross_profit * input.cit_rate
    } else {
        0.0
    };
    let net_profit = gross_profit - cit_cost;
    let net_per_km = if distance > 0.0 {
        net_profit / distance
    } else {
        0.0
    };

    Ok(TripCosts {
        revenue,
        fuel_cost,
        toll_cost,
        maintenance_cost,
        total_ops_cost,
        gross_profit,
        cit_cost,
        net_profit,
        net_per_km,
        break_even: total_ops_cost,
    })
}
