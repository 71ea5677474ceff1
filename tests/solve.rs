use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use walksat::sat::cnf::Cnf;
use walksat::sat::configs::SolverConfig;
use walksat::sat::dimacs::{parse_dimacs_str, parse_file};
use walksat::sat::solver::{Solver, Verdict};
use walksat::sat::walksat::WalkSat;

fn fixtures(which: &str) -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("cnf")
        .join(which);
    let files: Vec<_> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| p.extension().is_some_and(|ext| ext == "cnf"))
        .collect();
    assert!(!files.is_empty(), "no {which} fixtures found");
    files
}

fn generous() -> SolverConfig {
    SolverConfig::default()
        .with_seed(42)
        .with_max_tries(200)
        .with_max_flips(10_000)
}

#[test]
fn test_satisfiable_fixtures() {
    for path in fixtures("sat") {
        eprintln!("Solving... {}", path.display());
        let cnf = parse_file(&path).unwrap();
        let mut solver = WalkSat::new(cnf.clone(), generous()).unwrap();

        let verdict = solver.solve();
        let model = verdict
            .model()
            .unwrap_or_else(|| panic!("{} should be satisfied", path.display()));

        assert!(cnf.is_satisfied_by(model));
        assert!(cnf.verify(&model.to_solutions()));
        assert_eq!(verdict.status_line(), "s SATISFIABLE");
    }
}

#[test]
fn test_unsatisfiable_fixtures_exhaust_the_budget() {
    let config = SolverConfig::default()
        .with_seed(3)
        .with_max_tries(4)
        .with_max_flips(250);

    for path in fixtures("unsat") {
        eprintln!("Solving... {}", path.display());
        let cnf = parse_file(&path).unwrap();
        let mut solver = WalkSat::new(cnf, config).unwrap();

        let verdict = solver.solve();
        assert_eq!(verdict, Verdict::Exhausted);
        assert_eq!(verdict.status_line(), "s UNSATISFIABLE");

        let stats = solver.stats();
        assert_eq!(stats.tries, 4);
        assert_eq!(stats.flips, 4 * 250);
        assert_eq!(stats.flips, stats.random_walk_moves + stats.greedy_moves);
    }
}

#[test]
fn test_written_dimacs_parses_back() {
    for path in fixtures("sat").into_iter().chain(fixtures("unsat")) {
        let cnf = parse_file(&path).unwrap();
        let again = parse_dimacs_str(&cnf.to_string()).unwrap();
        assert_eq!(cnf, again, "{}", path.display());
    }
}

#[test]
fn test_seed_reproduces_the_run() {
    let path = &fixtures("sat")[0];
    let cnf = parse_file(path).unwrap();
    let config = SolverConfig::default().with_seed(11).with_max_flips(50);

    let mut first = WalkSat::new(cnf.clone(), config).unwrap();
    let mut second = WalkSat::new(cnf, config).unwrap();

    assert_eq!(first.solve(), second.solve());
    assert_eq!(first.stats(), second.stats());
    assert_eq!(first.stats().seed, 11);
}

#[test]
fn test_tiny_formula_end_to_end() {
    let cnf = Cnf::from_clauses(vec![vec![1, -2], vec![2, 3], vec![-1, -3], vec![-3]]).unwrap();
    let mut solver = WalkSat::new(cnf.clone(), generous()).unwrap();

    let verdict = solver.solve();
    let model = verdict.model().unwrap();

    // -3 forces 2, which forces 1.
    assert!(model.value(1));
    assert!(model.value(2));
    assert!(!model.value(3));
    assert_eq!(model.to_solutions().to_string(), "v 1 2 -3 0");
}
