mod common;

use checkout_flow::domain::method::MethodId;
use checkout_flow::domain::state::ConfirmLabel;
use common::{METHODS, started};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[tokio::test(start_paused = true)]
async fn test_last_selection_wins_for_random_sequences() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let h = started().await;
        let len = rng.gen_range(1..20);
        let mut last = None;

        for _ in 0..len {
            let method = *METHODS.choose(&mut rng).unwrap();
            h.checkout.select(method.into()).await.unwrap();
            last = Some(MethodId::from(method));
        }

        let active = h.view.active_options();
        assert_eq!(active.len(), 1, "exactly one option must be active");
        assert_eq!(active.first(), last.as_ref());
        assert_eq!(h.checkout.state().await.selected_method, last);
        assert_eq!(
            h.view.confirm_control().map(|c| c.label),
            Some(ConfirmLabel::Confirm)
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_unknown_ids_never_displace_selection() {
    let mut rng = StdRng::seed_from_u64(42);
    let h = started().await;
    h.checkout.select("mobile_wallet".into()).await.unwrap();
    let mut expected = MethodId::from("mobile_wallet");

    for i in 0..100 {
        if rng.gen_bool(0.5) {
            let method = *METHODS.choose(&mut rng).unwrap();
            h.checkout.select(method.into()).await.unwrap();
            expected = method.into();
        } else {
            let bogus = format!("unknown_{i}");
            assert!(h.checkout.select(bogus.as_str().into()).await.is_err());
        }

        assert_eq!(h.view.active_options(), vec![expected.clone()]);
    }
}
