#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::candidate::Candidate;
    use crate::ranked::RankedTargetView;
    use crate::scoring::ScoringEngine;
    use sightline_core::components::Vitals;
    use sightline_core::config::WeightConfig;
    use sightline_core::enums::Rarity;
    use sightline_core::types::EntityId;

    fn cand(id: u64, x: f32, y: f32) -> Candidate {
        Candidate::new(EntityId::new(id), Vec2::new(x, y))
    }

    /// Weights with clustering and smoothing off: only the base term.
    fn base_only() -> WeightConfig {
        let mut config = WeightConfig::default();
        config.cluster.enabled = false;
        config.smoothing.enabled = false;
        config
    }

    fn score(
        engine: &mut ScoringEngine,
        candidates: &mut Vec<Candidate>,
        config: &WeightConfig,
    ) {
        engine.update_weights(candidates, Vec2::ZERO, config, |_| true);
    }

    fn weight_of(candidates: &[Candidate], id: u64) -> f32 {
        candidates
            .iter()
            .find(|c| c.id == EntityId::new(id))
            .map(|c| c.weight)
            .unwrap_or_else(|| panic!("Candidate {id} missing"))
    }

    /// One-shot base weight for a lone candidate at `pos`.
    fn base_weight_at(pos: Vec2, rarity: Rarity) -> f32 {
        let mut engine = ScoringEngine::new();
        let mut cands = vec![cand(99, pos.x, pos.y).with_rarity(rarity)];
        score(&mut engine, &mut cands, &base_only());
        cands[0].weight
    }

    // ---- Base weight ----

    #[test]
    fn test_base_weight_monotonic_in_distance() {
        let mut engine = ScoringEngine::new();
        let config = base_only();
        let mut cands: Vec<Candidate> = (0..=10)
            .rev()
            .map(|i| {
                cand(i, i as f32 * 10.0, 0.0)
                    .with_rarity(Rarity::Unique)
                    .with_vitals(Vitals::life_fraction(0.5))
            })
            .collect();
        score(&mut engine, &mut cands, &config);

        let ids: Vec<u64> = cands.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, (0..=10).collect::<Vec<_>>(), "Nearer candidates rank first");
        for pair in cands.windows(2) {
            assert!(
                pair[0].weight > pair[1].weight,
                "Weight must fall with distance: {} at {} vs {} at {}",
                pair[0].weight,
                pair[0].distance,
                pair[1].weight,
                pair[1].distance
            );
        }
        assert_eq!(cands[10].weight, 0.0, "Weight at max distance is zero");
    }

    #[test]
    fn test_distance_recomputed_from_observer() {
        let mut engine = ScoringEngine::new();
        let mut cands = vec![Candidate {
            distance: 999.0,
            ..cand(1, 3.0, 4.0)
        }];
        score(&mut engine, &mut cands, &base_only());
        assert!((cands[0].distance - 5.0).abs() < 1e-6);
        assert!(cands[0].weight > 0.0, "Stale distance must not zero the weight");
    }

    #[test]
    fn test_out_of_range_gets_zero_and_skips_passes() {
        let mut engine = ScoringEngine::new();
        let config = WeightConfig::default();
        let mut cands = vec![cand(1, 150.0, 0.0), cand(2, 10.0, 0.0)];
        score(&mut engine, &mut cands, &config);
        assert_eq!(weight_of(&cands, 1), 0.0);
        assert_eq!(
            engine.state().previous_weight(EntityId::new(1)),
            None,
            "Out-of-range candidates are not smoothed"
        );
        assert!(engine.clusters().is_empty());
    }

    // ---- Clustering ----

    #[test]
    fn test_cluster_bonus_never_below_base() {
        let positions = [(10.0, 0.0), (12.0, 0.0), (10.0, 2.0), (12.0, 2.0)];
        let build = || -> Vec<Candidate> {
            positions
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| cand(i as u64 + 1, x, y))
                .collect()
        };

        let mut plain = build();
        score(&mut ScoringEngine::new(), &mut plain, &base_only());

        let mut config = WeightConfig::default();
        config.smoothing.enabled = false;
        let mut engine = ScoringEngine::new();
        let mut clustered = build();
        score(&mut engine, &mut clustered, &config);

        assert_eq!(engine.clusters().len(), 1, "All four form one cluster");
        for id in 1..=4 {
            let base = weight_of(&plain, id);
            let boosted = weight_of(&clustered, id);
            assert!(
                boosted >= base,
                "Cluster member {id} dropped from {base} to {boosted}"
            );
        }
    }

    #[test]
    fn test_isolated_normal_strictly_penalised() {
        let mut config = WeightConfig::default();
        config.smoothing.enabled = false;

        let base = base_weight_at(Vec2::new(10.0, 0.0), Rarity::Normal);
        let mut cands = vec![cand(1, 10.0, 0.0).with_rarity(Rarity::Normal)];
        score(&mut ScoringEngine::new(), &mut cands, &config);
        assert!(
            cands[0].weight < base,
            "Isolated normal {} must be below base {base}",
            cands[0].weight
        );
        assert!((cands[0].weight - base * 0.8).abs() < 1e-5);

        let rare_base = base_weight_at(Vec2::new(10.0, 0.0), Rarity::Rare);
        let mut rare = vec![cand(2, 10.0, 0.0).with_rarity(Rarity::Rare)];
        score(&mut ScoringEngine::new(), &mut rare, &config);
        assert!((rare[0].weight - rare_base).abs() < 1e-6, "Rare is never penalised");
    }

    #[test]
    fn test_two_entity_cluster_scenario() {
        let mut config = WeightConfig::default();
        config.smoothing.enabled = false;
        config.cluster.radius = 15.0;
        config.cluster.min_cluster_size = 2;
        config.cluster.isolation_penalty_enabled = false;

        // 10 apart: one cluster, both members within the core radius.
        let mut engine = ScoringEngine::new();
        let mut near = vec![cand(1, 20.0, 0.0), cand(2, 30.0, 0.0)];
        score(&mut engine, &mut near, &config);
        assert_eq!(engine.clusters().len(), 1);
        assert_eq!(engine.clusters()[0].centroid, Vec2::new(25.0, 0.0));
        for (id, x) in [(1, 20.0), (2, 30.0)] {
            let base = base_weight_at(Vec2::new(x, 0.0), Rarity::Normal);
            assert!(
                weight_of(&near, id) > base,
                "Member {id} at 10 apart should get a bonus"
            );
        }

        // 20 apart: nothing survives, weights stay at base.
        let mut engine = ScoringEngine::new();
        let mut far = vec![cand(1, 20.0, 0.0), cand(2, 40.0, 0.0)];
        score(&mut engine, &mut far, &config);
        assert!(engine.clusters().is_empty(), "20 apart exceeds radius 15");
        for (id, x) in [(1, 20.0), (2, 40.0)] {
            let base = base_weight_at(Vec2::new(x, 0.0), Rarity::Normal);
            assert!((weight_of(&far, id) - base).abs() < 1e-6);
        }
    }

    // ---- Smoothing ----

    #[test]
    fn test_smoothing_converges_monotonically() {
        let mut config = WeightConfig::default();
        config.cluster.enabled = false;
        let target = base_weight_at(Vec2::new(10.0, 0.0), Rarity::Normal);

        let mut engine = ScoringEngine::new();
        let mut cands = vec![cand(1, 60.0, 0.0)];
        score(&mut engine, &mut cands, &config);
        let mut last = cands[0].weight;
        assert!(last < target);

        for frame in 0..40 {
            let mut cands = vec![cand(1, 10.0, 0.0)];
            score(&mut engine, &mut cands, &config);
            let w = cands[0].weight;
            assert!(
                w >= last && w <= target + 1e-6,
                "Frame {frame}: {w} should move from {last} toward {target}"
            );
            last = w;
        }
        assert!((last - target).abs() < 1e-3, "Converged to {last}, wanted {target}");
    }

    #[test]
    fn test_smoothing_damps_spike() {
        let mut config = WeightConfig::default();
        config.cluster.enabled = false;

        let mut engine = ScoringEngine::new();
        let mut steady = 0.0;
        for _ in 0..30 {
            let mut cands = vec![cand(1, 50.0, 0.0)];
            score(&mut engine, &mut cands, &config);
            steady = cands[0].weight;
        }

        let spike_raw = base_weight_at(Vec2::new(5.0, 0.0), Rarity::Normal);
        let mut cands = vec![cand(1, 5.0, 0.0)];
        score(&mut engine, &mut cands, &config);
        let spiked = cands[0].weight;
        assert!(
            spiked > steady && spiked < spike_raw,
            "One-frame spike {spike_raw} damped to {spiked} (steady {steady})"
        );
        let expected = steady + (spike_raw - steady) * config.smoothing.factor;
        assert!((spiked - expected).abs() < 1e-5);
    }

    #[test]
    fn test_leaving_range_drops_smoothing_history() {
        let mut config = WeightConfig::default();
        config.cluster.enabled = false;
        let mut engine = ScoringEngine::new();
        for _ in 0..5 {
            score(&mut engine, &mut vec![cand(1, 80.0, 0.0)], &config);
        }
        assert!(engine.state().previous_weight(EntityId::new(1)).is_some());

        score(&mut engine, &mut vec![cand(1, 150.0, 0.0)], &config);
        assert_eq!(
            engine.state().previous_weight(EntityId::new(1)),
            None,
            "Out-of-range candidate keeps no history"
        );

        let raw = base_weight_at(Vec2::new(10.0, 0.0), Rarity::Normal);
        let mut back = vec![cand(1, 10.0, 0.0)];
        score(&mut engine, &mut back, &config);
        assert!(
            (back[0].weight - raw).abs() < 1e-6,
            "Returning candidate starts from its raw weight, got {}",
            back[0].weight
        );
    }

    #[test]
    fn test_disabling_smoothing_forgets_history() {
        let mut config = WeightConfig::default();
        config.cluster.enabled = false;
        let mut engine = ScoringEngine::new();
        score(&mut engine, &mut vec![cand(1, 10.0, 0.0)], &config);
        assert_eq!(engine.state().previous_len(), 1);

        config.smoothing.enabled = false;
        score(&mut engine, &mut vec![cand(1, 10.0, 0.0)], &config);
        assert_eq!(engine.state().previous_len(), 0);
    }

    // ---- Caches ----

    #[test]
    fn test_cache_purge_evicts_departed_ids() {
        let mut config = WeightConfig::default();
        config.cluster.enabled = false;
        config.cache_purge_interval = 3;
        let mut engine = ScoringEngine::new();
        let departed = EntityId::new(2);

        let mut first = vec![
            cand(1, 10.0, 0.0).with_rarity(Rarity::Magic),
            cand(2, 80.0, 0.0).with_rarity(Rarity::Rare),
        ];
        score(&mut engine, &mut first, &config);
        score(&mut engine, &mut vec![cand(1, 10.0, 0.0)], &config);
        assert!(
            engine.state().previous_weight(departed).is_some(),
            "Not purged before the interval elapses"
        );

        score(&mut engine, &mut vec![cand(1, 10.0, 0.0)], &config);
        assert_eq!(engine.state().previous_weight(departed), None);
        assert_eq!(engine.state().rarity_len(), 1, "Only the live id keeps its rarity");
        assert!(engine.state().previous_weight(EntityId::new(1)).is_some());
    }

    #[test]
    fn test_respawned_entity_starts_unsmoothed() {
        let mut config = WeightConfig::default();
        config.cluster.enabled = false;
        let mut engine = ScoringEngine::new();
        for _ in 0..5 {
            score(&mut engine, &mut vec![cand(1, 80.0, 0.0)], &config);
        }

        // Same spot, new id: raw weight, no history carried over.
        let raw = base_weight_at(Vec2::new(10.0, 0.0), Rarity::Normal);
        let mut cands = vec![cand(2, 10.0, 0.0)];
        score(&mut engine, &mut cands, &config);
        assert!((cands[0].weight - raw).abs() < 1e-6);
    }

    #[test]
    fn test_rarity_remembered_when_unreadable() {
        let mut config = WeightConfig::default();
        config.cluster.enabled = false;
        config.smoothing.enabled = false;
        let mut engine = ScoringEngine::new();

        let mut seen = vec![cand(1, 10.0, 0.0).with_rarity(Rarity::Unique)];
        score(&mut engine, &mut seen, &config);
        let mut unread = vec![cand(1, 10.0, 0.0)];
        score(&mut engine, &mut unread, &config);
        assert!((seen[0].weight - unread[0].weight).abs() < 1e-6);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut engine = ScoringEngine::new();
        let mut cands = vec![
            cand(1, 10.0, 0.0).with_rarity(Rarity::Magic),
            cand(2, 11.0, 0.0).with_vitals(Vitals::life_fraction(0.3)),
            cand(3, 12.0, 0.0),
        ];
        score(&mut engine, &mut cands, &WeightConfig::default());
        assert!(!engine.state().is_empty());
        assert_eq!(engine.clusters().len(), 1);

        engine.reset();
        assert!(engine.state().is_empty());
        assert!(engine.clusters().is_empty());
    }

    // ---- Pipeline ----

    #[test]
    fn test_stale_candidates_dropped() {
        let mut engine = ScoringEngine::new();
        let mut cands = vec![cand(1, 5.0, 0.0), cand(2, 6.0, 0.0), cand(3, 7.0, 0.0)];
        engine.update_weights(&mut cands, Vec2::ZERO, &WeightConfig::default(), |id| {
            id != EntityId::new(2)
        });
        let ids: Vec<u64> = cands.iter().map(|c| c.id.get()).collect();
        assert!(!ids.contains(&2), "Stale candidate must be dropped");
        assert_eq!(ids.len(), 2);
        assert_eq!(engine.state().previous_weight(EntityId::new(2)), None);
    }

    #[test]
    fn test_disabled_weighting_keeps_insertion_order() {
        let mut config = WeightConfig::default();
        config.enabled = false;
        let mut engine = ScoringEngine::new();
        let mut cands = vec![cand(1, 90.0, 0.0), cand(2, 1.0, 0.0), cand(3, 40.0, 0.0)];
        score(&mut engine, &mut cands, &config);
        let ids: Vec<u64> = cands.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(cands.iter().all(|c| c.weight == 0.0));
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let mut engine = ScoringEngine::new();
        let mut cands = vec![
            cand(1, 50.0, 0.0),
            cand(2, 0.0, 10.0),
            cand(3, 10.0, 0.0),
            cand(4, 5.0, 0.0),
        ];
        score(&mut engine, &mut cands, &base_only());
        for pair in cands.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
        let ids: Vec<u64> = cands.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![4, 2, 3, 1], "Equal weights keep insertion order");

        let view = RankedTargetView::from_candidates(&cands);
        assert_eq!(view.best().map(|t| t.id), Some(EntityId::new(4)));
    }
}
