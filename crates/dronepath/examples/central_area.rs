//! Plan one delivery into a central area past a forbidden zone.
//!
//! Usage:
//!   cargo run -p dronepath --example central_area
//!
//! Prints the number of waypoints, the flown length, and the expansions used.

use dronepath::api::{try_plan, PlanError, Point, Region, SearchCfg};

fn rect(name: &str, lng0: f64, lat0: f64, lng1: f64, lat1: f64) -> Region {
    Region::new(
        name,
        vec![
            Point::new(lng0, lat0),
            Point::new(lng1, lat0),
            Point::new(lng1, lat1),
            Point::new(lng0, lat1),
            Point::new(lng0, lat0),
        ],
    )
}

fn main() {
    let central = rect("central", -3.192473, 55.942617, -3.184319, 55.946233);
    let zones = vec![rect("square", -3.1900, 55.9425, -3.1880, 55.9440)];
    let start = Point::new(-3.1940, 55.9430);
    let goal = Point::new(-3.186874, 55.944494);

    match try_plan(SearchCfg::default(), start, goal, &zones, &central) {
        Ok(route) => println!(
            "route: {} waypoints, length {:.6}°, {} expansions",
            route.waypoints.len(),
            route.length,
            route.expansions
        ),
        Err(PlanError::Search(failure)) => println!("{failure}"),
        Err(e) => eprintln!("bad input: {e}"),
    }
}
