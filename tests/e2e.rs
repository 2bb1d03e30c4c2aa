use seeded_graph_matching::*;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `rows` as a CSV file with a header row and a row label column.
fn write_matrix(dir: &Path, name: &str, rows: &[Vec<f64>]) -> PathBuf {
    let mut content = String::new();
    for j in 0..rows.first().map_or(0, |row| row.len()) {
        write!(content, ",V{}", j + 1).unwrap();
    }
    content.push('\n');
    for (i, row) in rows.iter().enumerate() {
        write!(content, "{}", i + 1).unwrap();
        for x in row {
            write!(content, ",{}", x).unwrap();
        }
        content.push('\n');
    }
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn path_graph() -> Vec<Vec<f64>> {
    vec![
        vec![0., 1., 0., 0.],
        vec![1., 0., 1., 0.],
        vec![0., 1., 0., 1.],
        vec![0., 0., 1., 0.],
    ]
}

fn identity(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1. } else { 0. }).collect())
        .collect()
}

fn make_config(dir: &Path, a: &[Vec<f64>], b: &[Vec<f64>], p: &[Vec<f64>]) -> RunConfig {
    RunConfig {
        a_path: write_matrix(dir, "A.csv", a),
        b_path: write_matrix(dir, "B.csv", b),
        p_path: write_matrix(dir, "P.csv", p),
        outpath: dir.join("corr.txt"),
        ..RunConfig::default()
    }
}

#[test]
pub fn identity_correspondence_is_written() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    let mut config = make_config(dir, &path_graph(), &path_graph(), &identity(4));
    config.summary = Some(dir.join("summary.json"));
    config.plot = Some(dir.join("plots"));

    let summary = run(&config).unwrap();
    assert_eq!(summary.n_seeds, 4);
    assert_eq!(summary.correspondence, [0, 1, 2, 3]);
    assert_eq!(
        fs::read_to_string(&config.outpath).unwrap(),
        "1 1\n2 2\n3 3\n4 4\n"
    );
    assert_eq!(RunSummary::load(&dir.join("summary.json")).unwrap(), summary);
    assert!(dir.join("plots/A.svg").exists());
    assert!(dir.join("plots/B_perm.svg").exists());
}

#[test]
pub fn swapped_nodes_are_found() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    let b = vec![
        vec![0., 0., 1., 0.],
        vec![0., 0., 1., 1.],
        vec![1., 1., 0., 0.],
        vec![0., 1., 0., 0.],
    ];
    let p = vec![vec![0.25; 4]; 4];
    let config = make_config(dir, &path_graph(), &b, &p);
    let summary = run(&config).unwrap();
    assert_eq!(summary.n_seeds, 0);
    assert_eq!(summary.distances.permuted, 0.);
    assert!(summary.distances.unpermuted > 0.);

    let mut single = config.clone();
    single.numeric.precision = Precision::Single;
    let summary = run(&single).unwrap();
    let mut sorted = summary.correspondence.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, [0, 1, 2, 3]);
}

#[test]
pub fn files_without_row_labels() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    let write_plain = |name: &str, rows: &[Vec<f64>]| {
        let mut content = String::from("a,b,c,d\n");
        for row in rows {
            let fields: Vec<String> = row.iter().map(|x| x.to_string()).collect();
            content.push_str(&fields.join(","));
            content.push('\n');
        }
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    };
    let config = RunConfig {
        a_path: write_plain("A.csv", &path_graph()),
        b_path: write_plain("B.csv", &path_graph()),
        p_path: write_plain("P.csv", &identity(4)),
        outpath: dir.join("corr.txt"),
        index_column: false,
        ..RunConfig::default()
    };
    let summary = run(&config).unwrap();
    assert_eq!(summary.n, 4);
    assert_eq!(summary.correspondence, [0, 1, 2, 3]);

    // read with a label column, the same files lose one column
    let labelled = RunConfig {
        index_column: true,
        ..config
    };
    assert!(matches!(run(&labelled), Err(Error::NotSquare { .. })));
}

#[test]
pub fn accelerator_request_runs_on_host() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    let mut config = make_config(dir, &path_graph(), &path_graph(), &identity(4));
    config.numeric.device = Device::Accelerator;
    assert_eq!(run(&config).unwrap().correspondence, [0, 1, 2, 3]);
}

#[test]
pub fn failures_are_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    let star = vec![
        vec![0., 1., 1., 1.],
        vec![1., 0., 0., 0.],
        vec![1., 0., 0., 0.],
        vec![1., 0., 0., 0.],
    ];
    let config = make_config(dir, &path_graph(), &star, &identity(4));
    assert!(matches!(run(&config), Err(Error::SeedBlockMismatch { .. })));
    assert!(!config.outpath.exists());

    let mut partitioned = config.clone();
    partitioned.solver.partition = 2;
    assert!(matches!(
        run(&partitioned),
        Err(Error::UnsupportedPartition(2))
    ));

    let mut missing = config.clone();
    missing.a_path = dir.join("missing.csv");
    assert!(run(&missing).is_err());

    let mut not_square = config.clone();
    not_square.b_path = write_matrix(dir, "rect.csv", &[vec![0., 1., 0.], vec![1., 0., 1.]]);
    match run(&not_square) {
        Err(Error::NotSquare { path, rows, cols }) => {
            assert!(path.ends_with("rect.csv"));
            assert_eq!((rows, cols), (2, 3));
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let mut small_seeds = config.clone();
    small_seeds.p_path = write_matrix(dir, "P3.csv", &identity(3));
    assert!(matches!(
        run(&small_seeds),
        Err(Error::SeedShape { expected: 4, .. })
    ));
}
