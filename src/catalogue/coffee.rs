//! Coffee orders: a base drink plus add-ons, aggregated like stacked decorators.

use std::convert::Infallible;
use std::fmt;

use itertools::Itertools;

use crate::catalogue::Describe;
use crate::domain::{Capability, Hierarchy, HierarchyResult, NodeId};

/// Operation asking a leaf for its price.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cost;

/// Price in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Cents(pub u64);

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl std::ops::Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_add(rhs.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub price: Cents,
}

impl Ingredient {
    pub fn new(cents: u64) -> Self {
        Self {
            price: Cents(cents),
        }
    }
}

impl Capability<Cost> for Ingredient {
    type Output = Cents;
    type Error = Infallible;

    fn perform(&self, _label: &str, _op: &Cost) -> Result<Cents, Infallible> {
        Ok(self.price)
    }
}

impl Capability<Describe> for Ingredient {
    type Output = String;
    type Error = Infallible;

    fn perform(&self, label: &str, _op: &Describe) -> Result<String, Infallible> {
        Ok(label.to_string())
    }
}

/// Build an order container from `(name, cents)` items; the first item is the base.
pub fn order(
    h: &mut Hierarchy<Ingredient>,
    label: &str,
    items: &[(&str, u64)],
) -> HierarchyResult<NodeId> {
    let order = h.new_container(label);
    for &(name, cents) in items {
        let item = h.new_leaf(name, Ingredient::new(cents));
        h.attach(order, item)?;
    }
    Ok(order)
}

/// Description of everything below `id`, e.g. `Espresso + Milk + Sugar`.
pub fn description(h: &Hierarchy<Ingredient>, id: NodeId) -> HierarchyResult<String> {
    let parts = h.perform(id, &Describe)?.into_result()?;
    Ok(parts.iter().join(" + "))
}

/// Total price of everything below `id`.
pub fn total(h: &Hierarchy<Ingredient>, id: NodeId) -> HierarchyResult<Cents> {
    h.fold(id, &Cost, Cents::default(), |acc, price| acc + price)
}
