use genequest::align::run_local_alignment;
use genequest::align::scoring::{score_alignment, ScoringScheme};
use genequest::align::traceback::trace_back;
use genequest::io::simulate::random_sequence;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_reference_scenario() {
    let scheme = ScoringScheme::new(10, -4, -5);
    let alignment = run_local_alignment("ACGTA", "ACG", &scheme);

    assert_eq!(alignment.matrix.rows(), 6);
    assert_eq!(alignment.matrix.cols(), 4);
    assert_eq!(alignment.matrix.best_cell(), (3, 3));
    assert_eq!(alignment.matrix.best_score(), 30.0);

    assert_eq!(alignment.result.path, vec![(3, 3), (2, 2), (1, 1), (0, 1)]);
    assert_eq!(alignment.result.scores, vec![30.0, 20.0, 10.0, 0.0]);

    let summary = alignment.result.summarize();
    assert_eq!(summary.contig_span, Some((1, 3)));
    assert_eq!(summary.query_span, Some((1, 3)));
    assert_eq!(summary.score, 60.0);
}

#[test]
fn test_random_matrices_stay_non_negative() {
    let mut rng = StdRng::seed_from_u64(11);
    let scheme = ScoringScheme::new(3, -6, -4);

    for len in [0usize, 1, 7, 30] {
        let contig = random_sequence(&mut rng, len);
        let query = random_sequence(&mut rng, 12);
        let matrix = score_alignment(&contig, &query, &scheme);

        assert_eq!((matrix.rows(), matrix.cols()), (len + 1, 13));
        assert!(matrix.cells().iter().all(|&v| v >= 0.0));
        assert!(matrix.cells().row(0).iter().all(|&v| v == 0.0));
        assert!(matrix.cells().column(0).iter().all(|&v| v == 0.0));
    }
}

#[test]
fn test_traceback_ends_on_zero_and_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(5);
    let contig = random_sequence(&mut rng, 60);
    let query = random_sequence(&mut rng, 25);
    let scheme = ScoringScheme::default();

    let matrix = score_alignment(&contig, &query, &scheme);
    let result = trace_back(&matrix);

    assert_eq!(result.path.len(), result.scores.len());
    assert_eq!(result.path[0], matrix.best_cell());
    assert_eq!(*result.scores.last().unwrap(), 0.0);
    assert!(result.scores[..result.scores.len() - 1].iter().all(|&s| s > 0.0));

    let again = trace_back(&score_alignment(&contig, &query, &scheme));
    assert_eq!(result, again);
}

#[test]
fn test_exact_substring_scores_full_match() {
    let mut rng = StdRng::seed_from_u64(9);
    let contig = random_sequence(&mut rng, 200);
    let query = &contig[50..90];

    let matrix = score_alignment(&contig, query, &ScoringScheme::default());
    assert_eq!(matrix.best_score(), 400.0);
    assert_eq!(matrix.best_cell(), (90, 40));
}
