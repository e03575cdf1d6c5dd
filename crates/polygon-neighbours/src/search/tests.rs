use super::*;
use crate::geom::{Polygon, Vertex};
use crate::tiling::{expected_neighbours, quad_tiling, GridCfg};

fn poly(points: &[(f64, f64)]) -> Polygon {
    Polygon::new(points.iter().map(|&p| Vertex::from(p)).collect()).unwrap()
}

fn rows(ctx: &SearchContext, cfg: &ScheduleCfg) -> Vec<Vec<i64>> {
    run_search(ctx, cfg)
        .unwrap()
        .results
        .into_iter()
        .map(NeighbourResult::into_row)
        .collect()
}

#[test]
fn scenario_two_triangles_sharing_an_edge() {
    let polys = vec![
        poly(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]),
        poly(&[(1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (1.0, 0.0)]),
    ];
    let ctx = SearchContext::new(polys, vec![0, 1]).unwrap();
    assert_eq!(rows(&ctx, &ScheduleCfg::default()), vec![vec![1], vec![0]]);
}

#[test]
fn scenario_disjoint_triangles() {
    let polys = vec![
        poly(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]),
        poly(&[(5.0, 5.0), (6.0, 5.0), (5.0, 6.0), (5.0, 5.0)]),
    ];
    let ctx = SearchContext::new(polys, vec![1, 0]).unwrap();
    let outcome = run_search(&ctx, &ScheduleCfg::default()).unwrap();
    for result in &outcome.results {
        assert!(result.is_isolated());
        assert_eq!(result.row(), &[NO_NEIGHBOURS]);
        assert_eq!(result.neighbours().count(), 0);
    }
}

#[test]
fn scenario_fan_of_three_triangles() {
    // 0 shares its bottom edge with 1 and its left edge with 2; 1 and 2 only
    // meet at the origin.
    let polys = vec![
        poly(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]),
        poly(&[(0.0, 0.0), (1.0, 0.0), (0.5, -1.0), (0.0, 0.0)]),
        poly(&[(0.0, 0.0), (0.0, 1.0), (-1.0, 0.5), (0.0, 0.0)]),
    ];
    let ctx = SearchContext::new(polys, vec![0, 1, 2]).unwrap();
    assert_eq!(
        rows(&ctx, &ScheduleCfg::default()),
        vec![vec![1, 2], vec![0], vec![0]]
    );
}

#[test]
fn self_is_excluded_by_position_not_by_value() {
    // Two copies of the same triangle: each is the other's neighbour.
    let t = poly(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]);
    let ctx = SearchContext::new(vec![t.clone(), t], vec![0, 1]).unwrap();
    assert_eq!(rows(&ctx, &ScheduleCfg::default()), vec![vec![1], vec![0]]);
}

#[test]
fn results_follow_test_index_order() {
    let cfg = GridCfg {
        rows: 3,
        cols: 3,
        ..GridCfg::default()
    };
    let ctx = SearchContext::new(quad_tiling(cfg, 11), vec![8, 0, 4]).unwrap();
    let got = rows(&ctx, &ScheduleCfg::with_workers(3));
    assert_eq!(got, vec![vec![5, 7], vec![1, 3], vec![1, 3, 5, 7]]);
}

#[test]
fn repeated_runs_are_identical() {
    let cfg = GridCfg {
        rows: 6,
        cols: 7,
        ..GridCfg::default()
    };
    let ctx = SearchContext::all(quad_tiling(cfg, 3));
    let first = run_search(&ctx, &ScheduleCfg::default()).unwrap();
    let second = run_search(&ctx, &ScheduleCfg::default()).unwrap();
    let sequential = run_search(&ctx, &ScheduleCfg::sequential()).unwrap();
    assert_eq!(first.results, second.results);
    assert_eq!(first.results, sequential.results);
    let a = NeighbourTable::encode(&ctx, first.results).unwrap();
    let b = NeighbourTable::encode(&ctx, second.results).unwrap();
    assert_eq!(a, b);
}

#[test]
fn scale_run_uses_bounded_pool_and_fills_every_slot() {
    let cfg = GridCfg {
        rows: 10,
        cols: 12,
        ..GridCfg::default()
    };
    let ctx = SearchContext::all(quad_tiling(cfg, 99));
    let n = ctx.n_tests();
    let outcome = run_search(&ctx, &ScheduleCfg::default()).unwrap();
    let bound = hardware_concurrency().min(n);
    assert_eq!(outcome.workers, bound);
    assert!(outcome.threads_used >= 1 && outcome.threads_used <= bound);
    assert_eq!(outcome.results.len(), n);
    for (i, result) in outcome.results.iter().enumerate() {
        let got: Vec<usize> = result.neighbours().collect();
        assert_eq!(got, expected_neighbours(cfg, i), "quad {i}");
    }
}

#[test]
fn worker_count_bounds() {
    let hw = hardware_concurrency();
    let four = ScheduleCfg::with_workers(4);
    assert_eq!(worker_count(&four, 100), hw.min(4));
    assert_eq!(worker_count(&four, 2), hw.min(2));
    assert_eq!(worker_count(&four, 0), 0);
    assert_eq!(worker_count(&ScheduleCfg::sequential(), 50), 1);
    assert_eq!(
        worker_count(&ScheduleCfg::default(), 1_000_000),
        hardware_concurrency()
    );
    assert_eq!(ScheduleCfg::with_workers(0), ScheduleCfg::default());
}

#[test]
fn configured_workers_never_exceed_hardware() {
    let hw = hardware_concurrency();
    let cfg = ScheduleCfg::with_workers(hw + 8);
    assert_eq!(worker_count(&cfg, 1_000), hw);

    let grid = GridCfg {
        rows: 10,
        cols: 10,
        ..GridCfg::default()
    };
    let ctx = SearchContext::all(quad_tiling(grid, 4));
    let outcome = run_search(&ctx, &cfg).unwrap();
    assert_eq!(outcome.workers, hw.min(100));
    assert!(outcome.threads_used <= hw.min(100));
    assert_eq!(outcome.results.len(), 100);
}

#[test]
fn empty_test_list_schedules_nothing() {
    let ctx = SearchContext::new(quad_tiling(GridCfg::default(), 0), Vec::new()).unwrap();
    let outcome = run_search(&ctx, &ScheduleCfg::default()).unwrap();
    assert_eq!(outcome.workers, 0);
    assert!(outcome.results.is_empty());
    let table = NeighbourTable::encode(&ctx, outcome.results).unwrap();
    assert_eq!(table.shape(), (0, 0));
    assert_eq!(table.rows().count(), 0);
}

#[test]
fn out_of_range_test_index_is_rejected() {
    let polys = quad_tiling(GridCfg::default(), 0);
    let err = SearchContext::new(polys, vec![3, 64]).unwrap_err();
    assert_eq!(
        err,
        SearchError::TestIndexOutOfRange {
            slot: 1,
            index: 64,
            n_polygons: 64
        }
    );
}

#[test]
fn duplicate_test_index_is_rejected() {
    let polys = quad_tiling(GridCfg::default(), 0);
    let err = SearchContext::new(polys, vec![5, 2, 5]).unwrap_err();
    assert_eq!(
        err,
        SearchError::DuplicateTestIndex {
            slot: 2,
            index: 5,
            first_slot: 0
        }
    );
}

#[test]
fn direct_task_on_unknown_polygon_fails() {
    let ctx = SearchContext::all(quad_tiling(GridCfg::default(), 0));
    assert_eq!(
        neighbours_of(&ctx, 64),
        Err(SearchError::UnknownPolygon {
            index: 64,
            n_polygons: 64
        })
    );
}

#[test]
fn table_pads_with_sentinel() {
    let polys = vec![
        poly(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]),
        poly(&[(0.0, 0.0), (1.0, 0.0), (0.5, -1.0), (0.0, 0.0)]),
        poly(&[(0.0, 0.0), (0.0, 1.0), (-1.0, 0.5), (0.0, 0.0)]),
        poly(&[(9.0, 9.0), (8.0, 9.0), (9.0, 8.0), (9.0, 9.0)]),
    ];
    let ctx = SearchContext::new(polys, vec![3, 0, 1]).unwrap();
    let outcome = run_search(&ctx, &ScheduleCfg::with_workers(2)).unwrap();
    let table = NeighbourTable::encode(&ctx, outcome.results).unwrap();
    assert_eq!(table.shape(), (3, 2));
    assert_eq!(table.test_indices(), &[3, 0, 1]);
    assert_eq!(table.cells(), &[-1, -1, 1, 2, 0, -1]);
    assert_eq!(table.unpadded(0).unwrap(), &[-1]);
    assert_eq!(table.unpadded(2).unwrap(), &[0]);
    assert_eq!(table.row(3), None);
    let collected: Vec<&[i64]> = table.rows().collect();
    assert_eq!(collected[1], &[1, 2]);
}

#[test]
fn encoding_foreign_results_is_an_error() {
    let ctx = SearchContext::new(quad_tiling(GridCfg::default(), 0), vec![0, 1, 2]).unwrap();
    let other = SearchContext::new(quad_tiling(GridCfg::default(), 0), vec![0]).unwrap();
    let results = run_search(&other, &ScheduleCfg::default()).unwrap().results;
    assert_eq!(
        NeighbourTable::encode(&ctx, results),
        Err(SearchError::ResultCountMismatch {
            expected: 3,
            got: 1
        })
    );
}
