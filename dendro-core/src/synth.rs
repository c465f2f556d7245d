//! Random morphologies for demos and tests.

use glam::Vec3;
use rand::Rng;

use crate::{
    error::TreeError,
    neuron::{Neurite, NeuriteType, Neuron, Soma},
    point::Point,
    tree::Tree,
    types::NodeId,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthParams {
    /// Maximum number of bifurcation levels below the root section.
    pub max_depth: usize,
    /// Points per section, including the one shared with the parent.
    pub points_per_section: usize,
    pub step_len: f32,
    /// Radius at the start of the root section.
    pub radius: f32,
    /// Radius factor applied per section.
    pub taper: f32,
    /// Chance of a section ending in a bifurcation.
    pub branch_prob: f64,
    /// Random deviation of each step from the section heading.
    pub jitter: f32,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            max_depth: 5,
            points_per_section: 4,
            step_len: 5.0,
            radius: 1.0,
            taper: 0.8,
            branch_prob: 0.8,
            jitter: 0.3,
        }
    }
}

fn random_unit(rng: &mut impl Rng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        if let Some(n) = v.try_normalize() {
            return n;
        }
    }
}

/// Walks `n` steps from `start` along `heading`, with jitter.
fn grow_section(
    start: Point,
    heading: Vec3,
    r_end: f32,
    n: usize,
    params: &SynthParams,
    rng: &mut impl Rng,
) -> (Vec<Point>, Vec3) {
    let mut points = Vec::with_capacity(n + 1);
    points.push(start);

    let mut pos = start.pos;
    let mut dir = heading;
    for i in 1..=n {
        dir = (dir + random_unit(rng) * params.jitter).normalize_or(heading);
        pos += dir * params.step_len;
        let r = start.r + (r_end - start.r) * i as f32 / n as f32;
        points.push(Point {
            t: start.t,
            pos,
            r,
        });
    }
    (points, dir)
}

/// Grows a random bifurcating neurite starting at the origin.
pub fn random_neurite(
    kind: NeuriteType,
    params: &SynthParams,
    rng: &mut impl Rng,
) -> Result<Neurite, TreeError> {
    let start = Point {
        t: kind.tag(),
        pos: Vec3::ZERO,
        r: params.radius,
    };
    let tree = grow_tree(start, random_unit(rng), params, rng)?;
    Ok(Neurite::new(kind, tree))
}

fn grow_tree(
    start: Point,
    heading: Vec3,
    params: &SynthParams,
    rng: &mut impl Rng,
) -> Result<Tree, TreeError> {
    let steps = params.points_per_section.max(2) - 1;

    let (root_points, root_dir) =
        grow_section(start, heading, start.r * params.taper, steps, params, rng);
    let mut tree = Tree::new(root_points)?;

    // (section to extend from, its heading, depth)
    let mut open: Vec<(NodeId, Vec3, usize)> = vec![(tree.root(), root_dir, 0)];
    while let Some((parent, dir, depth)) = open.pop() {
        if depth >= params.max_depth || !rng.random_bool(params.branch_prob) {
            continue;
        }
        let Some(&last) = tree.node(parent).and_then(|n| n.points.last()) else {
            continue;
        };

        let side = dir.any_orthonormal_vector();
        for sign in [1.0f32, -1.0] {
            let heading =
                (dir + side * sign + random_unit(rng) * params.jitter).normalize_or(dir);
            let (points, child_dir) =
                grow_section(last, heading, last.r * params.taper, steps, params, rng);
            let id = tree.add_child(parent, points)?;
            open.push((id, child_dir, depth + 1));
        }
    }
    Ok(tree)
}

/// A soma at the origin with `n_neurites` random neurites around it.
///
/// The first neurite is an axon, the second an apical dendrite and the
/// rest basal dendrites.
pub fn random_neuron(
    n_neurites: usize,
    params: &SynthParams,
    rng: &mut impl Rng,
) -> Result<Neuron, TreeError> {
    let soma = Soma {
        center: Vec3::ZERO,
        radius: params.radius * 4.0,
    };

    let neurites = (0..n_neurites)
        .map(|i| {
            let kind = match i {
                0 => NeuriteType::Axon,
                1 => NeuriteType::ApicalDendrite,
                _ => NeuriteType::BasalDendrite,
            };
            let heading = random_unit(rng);
            let start = Point {
                t: kind.tag(),
                pos: soma.center + heading * soma.radius,
                r: params.radius,
            };
            Ok(Neurite::new(kind, grow_tree(start, heading, params, rng)?))
        })
        .collect::<Result<Vec<_>, TreeError>>()?;

    Ok(Neuron::new(soma, neurites))
}
