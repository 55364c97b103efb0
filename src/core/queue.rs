//! Waiting vehicles and their departure order

use log::debug;
use serde::{Serialize, Serializer};
use std::fmt;

/// Vehicle class, ranked by departure priority
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VehicleClass {
    Ambulance,
    Police,
    Car,
    Truck,
    /// Any label outside the priority table; departs after all known classes
    Other(String),
}

impl VehicleClass {
    /// Labels of the classes in the priority table, highest priority first
    pub const KNOWN: [&'static str; 4] = ["Ambulance", "Police", "Car", "Truck"];

    /// Departure rank, lower leaves first
    pub fn priority(&self) -> usize {
        match self {
            VehicleClass::Ambulance => 0,
            VehicleClass::Police => 1,
            VehicleClass::Car => 2,
            VehicleClass::Truck => 3,
            VehicleClass::Other(_) => Self::KNOWN.len(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, VehicleClass::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            VehicleClass::Ambulance => "Ambulance",
            VehicleClass::Police => "Police",
            VehicleClass::Car => "Car",
            VehicleClass::Truck => "Truck",
            VehicleClass::Other(label) => label,
        }
    }
}

impl From<&str> for VehicleClass {
    /// Exact, case-sensitive match; anything else becomes `Other`
    fn from(s: &str) -> Self {
        match s {
            "Ambulance" => VehicleClass::Ambulance,
            "Police" => VehicleClass::Police,
            "Car" => VehicleClass::Car,
            "Truck" => VehicleClass::Truck,
            other => VehicleClass::Other(other.to_string()),
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VehicleClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A vehicle waiting to leave
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub id: String,
    pub lane: String,
    pub class: VehicleClass,
}

/// Vehicles in admission order
#[derive(Debug, Default)]
pub struct VehicleQueue {
    vehicles: Vec<Vehicle>,
}

impl VehicleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vehicle. Ids are not checked for uniqueness.
    pub fn admit(&mut self, id: &str, lane: &str, class: VehicleClass) {
        debug!("Admitted vehicle {id} in lane {lane} ({class})");
        self.vehicles.push(Vehicle {
            id: id.to_string(),
            lane: lane.to_string(),
            class,
        });
    }

    /// Vehicles sorted by class priority, admission order within a class.
    ///
    /// The queue itself is left untouched, so repeated calls without an
    /// intervening [`admit`](Self::admit) return the same sequence.
    pub fn departure_order(&self) -> Vec<Vehicle> {
        let mut ordered = self.vehicles.clone();
        // sort_by_key is stable
        ordered.sort_by_key(|v| v.class.priority());
        ordered
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Vehicles in admission order
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(vehicles: &[Vehicle]) -> Vec<&str> {
        vehicles.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn test_departure_order_is_stable() {
        let mut queue = VehicleQueue::new();
        queue.admit("Car#1", "North", VehicleClass::Car);
        queue.admit("Ambulance#1", "South", VehicleClass::Ambulance);
        queue.admit("Car#2", "East", VehicleClass::Car);
        queue.admit("Police#1", "West", VehicleClass::Police);

        assert_eq!(
            ids(&queue.departure_order()),
            vec!["Ambulance#1", "Police#1", "Car#1", "Car#2"]
        );
    }

    #[test]
    fn test_departure_order_is_repeatable_and_non_destructive() {
        let mut queue = VehicleQueue::new();
        queue.admit("T", "North", VehicleClass::Truck);
        queue.admit("A", "North", VehicleClass::Ambulance);

        let first = queue.departure_order();
        let second = queue.departure_order();
        assert_eq!(first, second);
        assert_eq!(queue.len(), 2);
        assert_eq!(ids(&queue.iter().cloned().collect::<Vec<_>>()), vec!["T", "A"]);
    }

    #[test]
    fn test_unknown_classes_depart_last_in_admission_order() {
        let mut queue = VehicleQueue::new();
        queue.admit("bus", "North", "Bus".into());
        queue.admit("truck", "North", VehicleClass::Truck);
        queue.admit("bike", "North", "Bicycle".into());
        queue.admit("amb", "North", VehicleClass::Ambulance);

        assert_eq!(
            ids(&queue.departure_order()),
            vec!["amb", "truck", "bus", "bike"]
        );
    }

    #[test]
    fn test_duplicate_ids_are_kept() {
        let mut queue = VehicleQueue::new();
        queue.admit("V1", "North", VehicleClass::Car);
        queue.admit("V1", "South", VehicleClass::Car);
        let order = queue.departure_order();
        assert_eq!(order.len(), 2);
        assert_eq!(order[0].lane, "North");
        assert_eq!(order[1].lane, "South");
    }

    #[test]
    fn test_empty_queue() {
        let queue = VehicleQueue::new();
        assert!(queue.is_empty());
        assert!(queue.departure_order().is_empty());
    }

    #[test]
    fn test_class_parsing_is_case_sensitive() {
        assert_eq!(VehicleClass::from("Police"), VehicleClass::Police);
        assert_eq!(
            VehicleClass::from("police"),
            VehicleClass::Other("police".to_string())
        );
        assert!(!VehicleClass::from("police").is_known());
        assert_eq!(VehicleClass::from("Tram").to_string(), "Tram");
    }

    #[test]
    fn test_priority_table() {
        let ranks: Vec<usize> = VehicleClass::KNOWN
            .iter()
            .map(|label| VehicleClass::from(*label).priority())
            .collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert_eq!(VehicleClass::from("Boat").priority(), 4);
    }

    #[test]
    fn test_class_serializes_as_label() {
        let vehicle = Vehicle {
            id: "V1".into(),
            lane: "North".into(),
            class: VehicleClass::Ambulance,
        };
        let json = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "V1", "lane": "North", "class": "Ambulance"})
        );
    }
}
