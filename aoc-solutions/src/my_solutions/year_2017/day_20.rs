use std::collections::HashSet;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2017, day = 20, tags = ["2017", "math"])]
pub struct Solver;

type Vector = [i64; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particle {
    position: Vector,
    velocity: Vector,
    acceleration: Vector,
}

impl Particle {
    /// Position after `t` ticks, each tick adds the acceleration to the velocity
    /// and then the velocity to the position
    fn position_at(&self, t: i128) -> [i128; 3] {
        std::array::from_fn(|axis| {
            let p = i128::from(self.position[axis]);
            let v = i128::from(self.velocity[axis]);
            let a = i128::from(self.acceleration[axis]);
            p + v * t + a * t * (t + 1) / 2
        })
    }

    /// Twice the distance from the origin as `A t² + B t + C`, valid once every
    /// axis has settled on the sign it keeps forever
    ///
    /// Comparing these triples orders particles by how close they stay in the
    /// long run.
    fn long_run_distance(&self) -> (i128, i128, i128) {
        (0..3).fold((0, 0, 0), |(a2, b1, c0), axis| {
            let p = i128::from(self.position[axis]);
            let v = i128::from(self.velocity[axis]);
            let a = i128::from(self.acceleration[axis]);
            // 2 * position_at(t) on this axis
            let (t2, t1, t0) = (a, 2 * v + a, 2 * p);
            let sign = [t2, t1, t0]
                .into_iter()
                .find(|&c| c != 0)
                .map_or(0, i128::signum);
            (a2 + sign * t2, b1 + sign * t1, c0 + sign * t0)
        })
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Particle>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            // p=<x,y,z>, v=<x,y,z>, a=<x,y,z>
            let (position, velocity, acceleration) = line
                .split('<')
                .skip(1)
                .map(|part| -> anyhow::Result<Vector> {
                    let inner = part
                        .split_once('>')
                        .map(|(inner, _)| inner)
                        .ok_or_else(|| anyhow!("unclosed vector"))?;
                    let (x, y, z) = inner
                        .split(',')
                        .map(|c| c.trim().parse::<i64>())
                        .collect_tuple()
                        .ok_or_else(|| anyhow!("vectors have three components"))?;
                    Ok([x?, y?, z?])
                })
                .collect_tuple()
                .ok_or_else(|| anyhow!("expected p, v and a vectors"))?;
            Ok(Particle {
                position: position?,
                velocity: velocity?,
                acceleration: acceleration?,
            })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .position_min_by_key(|particle| particle.long_run_distance())
            .map(|idx| idx.to_string())
            .ok_or_else(|| SolveError::failed("no particles"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let collisions = shared
            .iter()
            .enumerate()
            .tuple_combinations()
            .filter_map(|((i, a), (j, b))| collision_time(a, b).map(|t| (t, i, j)))
            .sorted_unstable()
            .collect_vec();

        let mut destroyed = HashSet::new();
        for (_, group) in &collisions.into_iter().chunk_by(|&(t, _, _)| t) {
            let at_this_tick: Vec<usize> = group
                .filter(|(_, i, j)| !destroyed.contains(i) && !destroyed.contains(j))
                .flat_map(|(_, i, j)| [i, j])
                .collect();
            destroyed.extend(at_this_tick);
        }
        Ok((shared.len() - destroyed.len()).to_string())
    }
}

/// Integer roots `t >= 0` of `a t^2 + b t + c = 0`, `None` when every `t` is a root
fn non_negative_roots(a: i128, b: i128, c: i128) -> Option<Vec<i128>> {
    if a == 0 {
        if b == 0 {
            return if c == 0 { None } else { Some(Vec::new()) };
        }
        return Some(
            (c % b == 0 && -c / b >= 0)
                .then_some(-c / b)
                .into_iter()
                .collect(),
        );
    }
    let discriminant = b * b - 4 * a * c;
    if discriminant < 0 {
        return Some(Vec::new());
    }
    let root = discriminant.isqrt();
    if root * root != discriminant {
        return Some(Vec::new());
    }
    Some(
        [-b + root, -b - root]
            .into_iter()
            .filter(|numerator| numerator % (2 * a) == 0)
            .map(|numerator| numerator / (2 * a))
            .filter(|&t| t >= 0)
            .sorted_unstable()
            .dedup()
            .collect(),
    )
}

/// First tick at which both particles share a position
fn collision_time(first: &Particle, second: &Particle) -> Option<i128> {
    // the per-axis gap is dp + dv t + da t(t+1)/2, doubled to stay integral
    let candidates = (0..3).find_map(|axis| {
        let dp = i128::from(first.position[axis]) - i128::from(second.position[axis]);
        let dv = i128::from(first.velocity[axis]) - i128::from(second.velocity[axis]);
        let da = i128::from(first.acceleration[axis]) - i128::from(second.acceleration[axis]);
        non_negative_roots(da, da + 2 * dv, 2 * dp)
    });

    match candidates {
        // identical particles
        None => Some(0),
        Some(times) => times
            .into_iter()
            .find(|&t| first.position_at(t) == second.position_at(t)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve_part;

    #[test]
    fn test_part_1() {
        let input = "p=< 3,0,0>, v=< 2,0,0>, a=<-1,0,0>\np=< 4,0,0>, v=< 0,0,0>, a=<-2,0,0>";
        assert_eq!(solve_part::<Solver>(input, 1), "0");
    }

    #[test]
    fn test_part_2() {
        let input = "p=<-6,0,0>, v=< 3,0,0>, a=< 0,0,0>
p=<-4,0,0>, v=< 2,0,0>, a=< 0,0,0>
p=<-2,0,0>, v=< 1,0,0>, a=< 0,0,0>
p=< 3,0,0>, v=<-1,0,0>, a=< 0,0,0>";
        assert_eq!(solve_part::<Solver>(input, 2), "1");
    }

    #[test]
    fn test_part_1_velocity_against_acceleration() {
        // particle 0 is faster but brakes first, so it ends up closer
        let input = "p=<0,0,0>, v=<-10,0,0>, a=<1,0,0>\np=<0,0,0>, v=<3,0,0>, a=<1,0,0>";
        assert_eq!(solve_part::<Solver>(input, 1), "0");

        let input = "p=<5,0,0>, v=<0,0,0>, a=<0,0,0>\np=<-4,0,0>, v=<0,0,0>, a=<0,0,0>";
        assert_eq!(solve_part::<Solver>(input, 1), "1");
    }

    #[test]
    fn test_collision_needs_every_axis() {
        let a = Particle {
            position: [0, 0, 0],
            velocity: [1, 0, 0],
            acceleration: [0, 0, 0],
        };
        let b = Particle {
            position: [2, 1, 0],
            velocity: [0, 0, 0],
            acceleration: [0, 0, 0],
        };
        assert_eq!(collision_time(&a, &b), None);

        let c = Particle { position: [2, 0, 0], ..b };
        assert_eq!(collision_time(&a, &c), Some(2));
    }

    #[test]
    fn test_accelerating_collision() {
        // x = t(t+1)/2 reaches 3 at t = 2
        let a = Particle {
            position: [0, 5, 0],
            velocity: [0, 0, 0],
            acceleration: [1, 0, 0],
        };
        let b = Particle {
            position: [3, 5, 0],
            velocity: [0, 0, 0],
            acceleration: [0, 0, 0],
        };
        assert_eq!(a.position_at(2), [3, 5, 0]);
        assert_eq!(collision_time(&a, &b), Some(2));
    }

    #[test]
    fn test_rejects_malformed_particles() {
        assert!(Solver::parse("p=<1,2>, v=<0,0,0>, a=<0,0,0>").is_err());
        assert!(Solver::parse("p=<1,2,3>, v=<0,0,0>").is_err());
    }
}
