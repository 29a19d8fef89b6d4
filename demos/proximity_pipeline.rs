use proxgraph::{
    Column, EpsilonGraphBuilder, GraphBuilder, KnnGraphBuilder, MixedDistanceMetric,
    RngGraphBuilder, Table,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Minimal end-to-end: mixed table -> distances -> three proximity graphs.

    // Two obvious groups: small/red and large/blue.
    let table = Table::new(vec![
        Column::continuous("size", vec![1.0, 1.1, 0.9, 1.2, 9.0, 9.2, 8.8, 9.1]),
        Column::discrete("color", ["red", "red", "red", "red", "blue", "blue", "blue", "blue"]),
        Column::discrete("id", ["a", "b", "c", "d", "e", "f", "g", "h"]),
    ])?;

    let distances = MixedDistanceMetric::new()
        .with_label_column("id")
        .compute(&table)?;
    for advisory in &distances.advisories {
        println!("{advisory}");
    }
    let m = distances.value;

    let epsilon = EpsilonGraphBuilder::new(0.4);
    println!(
        "epsilon={} sits at the {:.1}th percentile of all distances",
        epsilon.epsilon(),
        epsilon.percentile(&m)
    );

    let graphs = [
        ("epsilon", epsilon.build(&m)?),
        ("knn", KnnGraphBuilder::new(2).with_include_closest(true).build(&m)?),
        ("rng", RngGraphBuilder::new().build(&m)?),
    ];

    for (name, out) in graphs {
        let stats = out.value.stats();
        println!(
            "{name}: n_nodes={} n_edges={} edges/node={:.2}",
            stats.nodes, stats.edges, stats.edges_per_node
        );
        for e in out.value.edges() {
            let items = out.value.items();
            println!(
                "  {} - {}  weight={:.3} distance={:.3}",
                items[e.source], items[e.target], e.weight, e.distance
            );
        }
    }

    Ok(())
}
