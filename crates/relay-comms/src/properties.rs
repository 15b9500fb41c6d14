//! Property-based checks over the link-state core.

use crate::testutil::{direct_hop, relay_hop, FixedTopology, MapDirectory};
use crate::{
    blackout, walker, CommsSettings, ComputedLinkState, EnvironmentInput, LinkEngine, LinkStatus,
    BITS_PER_MB, MAX_WALK_HOPS,
};
use proptest::prelude::*;

/// Hop signal strength in [0, 1]
fn strength() -> impl Strategy<Value = f64> {
    0.0..=1.0f64
}

/// Base transmit capacity in MB/s
fn rate_mb_s() -> impl Strategy<Value = f64> {
    0.0..=1000.0f64
}

/// Damping exponent over the tunable range
fn damping_exponent() -> impl Strategy<Value = f64> {
    0.1..=1.0f64
}

proptest! {
    #[test]
    fn unlinked_state_is_fully_zeroed(
        storm in any::<bool>(),
        atmospheric in any::<bool>(),
        base_rate in rate_mb_s(),
    ) {
        let engine = LinkEngine::default();
        let topology = FixedTopology::disconnected();
        let peers = MapDirectory::default();
        let env = EnvironmentInput {
            storm_blackout: storm,
            atmospheric_blackout: atmospheric,
            base_rate_mb_s: base_rate,
            ..EnvironmentInput::default()
        };

        let state = engine.update("VSL-P", &env, &topology, &peers);

        prop_assert!(!state.linked);
        prop_assert_eq!(state.rate_mb_s, 0.0);
        prop_assert_eq!(state.hop_rate_mb_s, 0.0);
        prop_assert_eq!(state.strength, 0.0);
        prop_assert_eq!(state.next_hop, None);
    }

    #[test]
    fn linked_rate_never_exceeds_hop_rate(
        s in strength(),
        base_rate in rate_mb_s(),
        downstream_rate in rate_mb_s(),
        exponent in damping_exponent(),
    ) {
        let engine = LinkEngine::new(CommsSettings {
            damping_exponent: exponent,
            ..CommsSettings::default()
        }).unwrap();

        let topology = FixedTopology::connected(relay_hop("VSL-DOWN", s));
        let mut peers = MapDirectory::default();
        peers.insert_linked("VSL-DOWN", downstream_rate);

        let env = EnvironmentInput {
            base_rate_mb_s: base_rate,
            ..EnvironmentInput::default()
        };
        let state = engine.update("VSL-P", &env, &topology, &peers);

        prop_assert!(state.linked);
        prop_assert!(state.rate_mb_s <= state.hop_rate_mb_s);
    }

    #[test]
    fn direct_link_bottleneck_is_own_hop(
        s in strength(),
        base_rate in rate_mb_s(),
    ) {
        let engine = LinkEngine::default();
        let topology = FixedTopology::connected(direct_hop(s));
        let peers = MapDirectory::default();
        let env = EnvironmentInput {
            base_rate_mb_s: base_rate,
            ..EnvironmentInput::default()
        };

        let state = engine.update("VSL-P", &env, &topology, &peers);
        prop_assert_eq!(state.rate_mb_s, state.hop_rate_mb_s);
        prop_assert_eq!(state.next_hop, None);
    }

    #[test]
    fn floor_clamp_is_exact_or_identity(
        rate in 0.0..=10.0f64,
        floor_bits in 0.0..=100.0f64,
    ) {
        let settings = CommsSettings {
            min_rate_bits_per_s: floor_bits,
            ..CommsSettings::default()
        };
        let clamped = settings.floor_clamp(rate);

        if rate == 0.0 {
            prop_assert_eq!(clamped, 0.0);
        } else if rate * BITS_PER_MB < floor_bits {
            prop_assert_eq!(clamped * BITS_PER_MB, floor_bits);
        } else {
            prop_assert_eq!(clamped, rate);
        }
    }

    #[test]
    fn storm_always_outranks_atmospheric(atmospheric in any::<bool>()) {
        prop_assert_eq!(
            blackout::resolve(false, true, atmospheric),
            LinkStatus::StormBlackout
        );
    }

    #[test]
    fn walker_bounded_on_any_ring(ring_len in 1usize..8) {
        // Artificial ring of linked states, each pointing at the next
        let mut peers = MapDirectory::default();
        for i in 0..ring_len {
            let state = ComputedLinkState {
                status: LinkStatus::IndirectLink,
                linked: true,
                strength: 0.5,
                rate_mb_s: 1.0,
                hop_rate_mb_s: 1.0,
                next_hop: Some(format!("VSL-{}", (i + 1) % ring_len)),
                ..ComputedLinkState::default()
            };
            peers.insert(&format!("VSL-{i}"), state);
        }

        let records = walker::walk("VSL-0", &peers);
        prop_assert_eq!(records.len(), MAX_WALK_HOPS);
    }
}
