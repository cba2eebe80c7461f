use crate::energy::total_energy;
use crate::lattice::Lattice;

/// Mean spin, in `[-1, 1]`.
pub fn magnetization(lattice: &Lattice) -> f64 {
    let up = lattice.count_up() as i64;
    let down = lattice.site_count() as i64 - up;
    (up - down) as f64 / lattice.site_count() as f64
}

pub fn energy_per_spin(lattice: &Lattice, field: f64) -> f64 {
    total_energy(lattice, field) / lattice.site_count() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Spin;
    use approx::assert_relative_eq;

    #[test]
    fn test_magnetization() {
        let mut lat = Lattice::uniform(4, Spin::Up);
        assert_relative_eq!(magnetization(&lat), 1.0);

        for col in 0..4 {
            lat.flip(0, col).unwrap();
            lat.flip(1, col).unwrap();
        }
        assert_relative_eq!(magnetization(&lat), 0.0);
        assert_relative_eq!(magnetization(&Lattice::uniform(3, Spin::Down)), -1.0);
    }

    #[test]
    fn test_ground_state_energy_per_spin() {
        let lat = Lattice::uniform(10, Spin::Up);
        assert_relative_eq!(energy_per_spin(&lat, 0.0), -2.0);
        assert_relative_eq!(energy_per_spin(&lat, 1.0), -3.0);
    }
}
