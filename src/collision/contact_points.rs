// Contact point extraction for overlapping polygon pairs.

use std::cmp::Ordering;

use super::raycast::segment_vs_segment;
use crate::math::vec2::Vec2;
use crate::shapes::Polygon;

/// Points closer than this are reported once.
const DUPLICATE_DISTANCE_SQ: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    // Starts sort before ends at equal x so edges touching at one x still meet.
    Start,
    End,
}

#[derive(Debug, Clone, Copy)]
struct Event {
    x: f32,
    kind: EventKind,
    shape: usize,
    edge: usize,
}

/// Boundary crossings of two polygons, found with a sweep along x.
///
/// Each edge opens at its smallest x and closes at its largest. A newly opened
/// edge is only tested against the other polygon's currently open edges. When
/// the boundaries never cross (one polygon swallowed by the other) the
/// vertices lying inside the other polygon are returned instead.
pub fn polygon_contact_points(a: &Polygon, b: &Polygon) -> Vec<Vec2> {
    let edges: [Vec<(Vec2, Vec2)>; 2] = [a.edges().collect(), b.edges().collect()];

    let mut events = Vec::with_capacity(2 * (edges[0].len() + edges[1].len()));
    for (shape, shape_edges) in edges.iter().enumerate() {
        for (edge, (start, end)) in shape_edges.iter().enumerate() {
            events.push(Event {
                x: start.x.min(end.x),
                kind: EventKind::Start,
                shape,
                edge,
            });
            events.push(Event {
                x: start.x.max(end.x),
                kind: EventKind::End,
                shape,
                edge,
            });
        }
    }
    events.sort_by(|l, r| {
        l.x.total_cmp(&r.x)
            .then(l.kind.cmp(&r.kind))
            .then(l.shape.cmp(&r.shape))
            .then(l.edge.cmp(&r.edge))
    });

    let mut open: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
    let mut points: Vec<Vec2> = Vec::new();

    for event in events {
        match event.kind {
            EventKind::Start => {
                let (start, end) = edges[event.shape][event.edge];
                let other = 1 - event.shape;
                for &candidate in &open[other] {
                    let (other_start, other_end) = edges[other][candidate];
                    if let Some(point) = segment_vs_segment(start, end, other_start, other_end).point() {
                        push_unique(&mut points, point);
                    }
                }
                open[event.shape].push(event.edge);
            }
            EventKind::End => {
                open[event.shape].retain(|&e| e != event.edge);
            }
        }
    }

    if points.is_empty() {
        for vertex in a.vertices().iter().filter(|v| b.contains_point(**v)) {
            push_unique(&mut points, *vertex);
        }
        for vertex in b.vertices().iter().filter(|v| a.contains_point(**v)) {
            push_unique(&mut points, *vertex);
        }
    }

    points.sort_by(|l, r| match l.x.total_cmp(&r.x) {
        Ordering::Equal => l.y.total_cmp(&r.y),
        ordering => ordering,
    });
    points
}

fn push_unique(points: &mut Vec<Vec2>, point: Vec2) {
    if points.iter().all(|p| p.distance_squared(point) > DUPLICATE_DISTANCE_SQ) {
        points.push(point);
    }
}
