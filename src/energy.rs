use crate::lattice::Lattice;

/// Energy change caused by flipping a site of spin `spin` whose four
/// neighbors sum to `neighbor_sum`, for unit coupling under field `field`.
#[inline(always)]
pub fn delta_energy(spin: i8, neighbor_sum: i8, field: f64) -> f64 {
    2.0 * f64::from(spin) * (f64::from(neighbor_sum) + field)
}

/// Ising Hamiltonian `-Σ s_i s_j - H Σ s_i`, every toroidal bond counted once.
pub fn total_energy(lattice: &Lattice, field: f64) -> f64 {
    let n = lattice.size();
    let mut bonds = 0i64;
    let mut spin_sum = 0i64;

    for row in 0..n {
        let below = (row + 1) % n;
        for col in 0..n {
            let right = (col + 1) % n;
            let s = lattice.spin_at(row, col).value() as i64;
            bonds += s * lattice.spin_at(below, col).value() as i64;
            bonds += s * lattice.spin_at(row, right).value() as i64;
            spin_sum += s;
        }
    }

    -(bonds as f64) - field * spin_sum as f64
}
