use gridpath::{Graph, Grid, Point, SearchResult};

// Risk map, entering a cell costs its digit
const RISK_MAP: &str = "\
1163751742
1381373672
2136511328
3694931569
7463417111
1319128137
1359912421
3125421639
1293138521
2311944581";


fn parse_digits(input: &str) -> Vec<Vec<u32>> {
    input
        .lines()
        .map(|line| line.chars().map(|c| c.to_digit(10).unwrap()).collect())
        .collect()
}

/// Repeat the map `times` x `times`, each tile one step higher, wrapping 9 -> 1
fn tile(rows: &[Vec<u32>], times: u32) -> Vec<Vec<u32>> {
    let mut tiled = Vec::new();
    for tile_y in 0..times {
        for row in rows {
            let mut line = Vec::new();
            for tile_x in 0..times {
                line.extend(row.iter().map(|v| ((v + tile_x + tile_y - 1) % 9) + 1));
            }
            tiled.push(line);
        }
    }
    tiled
}

fn build_graph(rows: Vec<Vec<u32>>) -> Graph<Point> {
    let grid = Grid::from_rows(rows).unwrap();
    grid.to_graph(|_, _, _, to: &u32| Some(f64::from(*to)))
}

fn manhattan_to(target: Point) -> impl Fn(&Point) -> f64 {
    move |p: &Point| p.distance(&target) as f64
}

/// Path runs target -> source and every step is an edge whose costs add up
fn assert_valid_path(graph: &Graph<Point>, result: &SearchResult<Point>, source: Point, target: Point) {
    assert_eq!(result.path.first(), Some(&target));
    assert_eq!(result.path.last(), Some(&source));

    let mut total = 0.0;
    for step in result.path.windows(2) {
        let (to, from) = (step[0], step[1]);
        let edge = graph
            .edges(&from)
            .iter()
            .find(|e| e.to == to)
            .unwrap_or_else(|| panic!("no edge {from} -> {to}"));
        total += edge.cost;
    }
    assert!((total - result.cost).abs() < 1e-9, "path sums to {total}, reported {}", result.cost);
}


#[test]
fn test_shortest_path_cost_small_map() {
    let graph = build_graph(parse_digits(RISK_MAP));
    assert_eq!(graph.shortest_path_cost(&Point::new(0, 0), &Point::new(9, 9)), 40.0);
}

#[test]
fn test_compute_all_paths_small_map() {
    let graph = build_graph(parse_digits(RISK_MAP));
    let paths = graph.compute_all_paths(&Point::new(0, 0));

    assert_eq!(paths.len(), 100);
    assert_eq!(paths.cost(&Point::new(9, 9)), 40.0);

    let path = paths.path_to(&Point::new(9, 9)).unwrap();
    assert_eq!(path.len(), 19);
}

#[test]
fn test_route_small_map() {
    let graph = build_graph(parse_digits(RISK_MAP));
    let (source, target) = (Point::new(0, 0), Point::new(9, 9));

    let result = graph.route(&source, &target);

    assert_eq!(result.cost, 40.0);
    assert_eq!(result.path.len(), 19);
    assert_valid_path(&graph, &result, source, target);
}

#[test]
fn test_a_star_small_map() {
    let graph = build_graph(parse_digits(RISK_MAP));
    let (source, target) = (Point::new(0, 0), Point::new(9, 9));

    let result = graph.a_star(&source, &target, manhattan_to(target));

    assert_eq!(result.cost, 40.0);
    assert_eq!(result.path.len(), 19);
    assert_valid_path(&graph, &result, source, target);
}

#[test]
fn test_tiled_map() {
    let graph = build_graph(tile(&parse_digits(RISK_MAP), 5));
    let (source, target) = (Point::new(0, 0), Point::new(49, 49));

    assert_eq!(graph.node_count(), 2500);
    assert_eq!(graph.shortest_path_cost(&source, &target), 315.0);

    let result = graph.route(&source, &target);
    assert_eq!(result.cost, 315.0);
    assert_valid_path(&graph, &result, source, target);

    let result = graph.a_star(&source, &target, manhattan_to(target));
    assert_eq!(result.cost, 315.0);
    assert_valid_path(&graph, &result, source, target);
}

#[test]
fn test_tile_wraps_digits() {
    let tiled = tile(&[vec![8, 9]], 2);
    assert_eq!(tiled, vec![vec![8, 9, 9, 1], vec![9, 1, 1, 2]]);
}

#[test]
fn test_a_star_multi_small_map() {
    let graph = build_graph(parse_digits(RISK_MAP));
    let source = Point::new(0, 0);
    let targets = vec![Point::new(9, 9), Point::new(0, 0), Point::new(5, 5), Point::new(9, 0)];

    // Aimed at the far corner, the heuristic only orders the expansion here
    let results = graph.a_star_multi(&source, &targets, manhattan_to(Point::new(9, 9)));

    assert_eq!(results.len(), targets.len());
    for (result, target) in results.iter().zip(&targets) {
        assert_eq!(&result.target, target);
        assert_eq!(result.cost, graph.shortest_path_cost(&source, target));
        let single = SearchResult { cost: result.cost, path: result.path.clone() };
        assert_valid_path(&graph, &single, source, *target);
    }
    assert_eq!(results[0].cost, 40.0);
    assert_eq!(results[1].path, vec![source]);
}

#[test]
fn test_walls_make_target_unreachable() {
    let mut rows = parse_digits(RISK_MAP);
    // 0 marks a wall that cannot be entered, box in the bottom right corner
    rows[8][9] = 0;
    rows[9][8] = 0;
    let grid = Grid::from_rows(rows).unwrap();
    let graph = grid.to_graph(|_, _, _, to: &u32| (*to != 0).then(|| f64::from(*to)));

    let (source, target) = (Point::new(0, 0), Point::new(9, 9));

    assert!(graph.shortest_path_cost(&source, &target).is_infinite());

    let result = graph.a_star(&source, &target, manhattan_to(target));
    assert_eq!(result.cost, f64::INFINITY);
    assert_eq!(result.path, vec![target]);
}
