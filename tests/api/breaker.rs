use rand;
use sentinel_breaker::circuitbreaker::{BreakerError, CircuitBreaker, Counts, Settings, State};
use sentinel_breaker::utils::ModifiedTimeProvider;
use sentinel_breaker::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Condvar, Mutex};
use std::thread;
use std::time::Duration;

fn counts(
    requests: u32,
    total_successes: u32,
    total_failures: u32,
    consecutive_successes: u32,
    consecutive_failures: u32,
) -> Counts {
    Counts {
        requests,
        total_successes,
        total_failures,
        consecutive_successes,
        consecutive_failures,
    }
}

fn fail(breaker: &CircuitBreaker) -> Result<()> {
    breaker.execute(|| Err(Error::msg("fail")))
}

fn succeed(breaker: &CircuitBreaker) -> Result<()> {
    breaker.execute(|| Ok(()))
}

#[test]
fn execute_walks_the_state_machine() {
    let clock = Arc::new(ModifiedTimeProvider::new());
    let breaker = CircuitBreaker::new(Settings {
        name: "execute".into(),
        timeout: Duration::from_secs(5),
        max_requests: 5,
        ready_to_trip: Arc::new(|counts: &Counts| counts.consecutive_failures > 5),
        time_provider: clock.clone(),
    });

    // 5 failures, still closed since more than 5 in a row are needed
    for _ in 0..5 {
        assert!(fail(&breaker).is_err());
    }
    assert_eq!(breaker.state(), State::Closed);
    assert_eq!(breaker.counts(), counts(5, 0, 5, 0, 5));

    // a success breaks the failure streak
    assert!(succeed(&breaker).is_ok());
    assert_eq!(breaker.state(), State::Closed);
    assert_eq!(breaker.counts(), counts(6, 1, 5, 1, 0));

    assert!(fail(&breaker).is_err());
    assert_eq!(breaker.state(), State::Closed);
    assert_eq!(breaker.counts(), counts(7, 1, 6, 0, 1));

    // 6 consecutive failures, closed -> open
    for _ in 0..5 {
        assert!(fail(&breaker).is_err());
    }
    assert_eq!(breaker.state(), State::Open);
    assert_eq!(breaker.counts(), Counts::default());
    assert!(breaker.expiry_ms().is_some());

    // calls are rejected while open
    let err = succeed(&breaker).unwrap_err();
    assert_eq!(err.downcast_ref::<BreakerError>(), Some(&BreakerError::Open));
    let err = fail(&breaker).unwrap_err();
    assert_eq!(err.downcast_ref::<BreakerError>(), Some(&BreakerError::Open));
    assert_eq!(breaker.counts(), Counts::default());

    // open -> half-open once the timeout elapsed
    clock.advance(6_000);
    assert!(succeed(&breaker).is_ok());
    assert_eq!(breaker.state(), State::HalfOpen);
    assert_eq!(breaker.expiry_ms(), None);
    assert_eq!(breaker.counts(), counts(1, 1, 0, 1, 0));

    // half-open -> open
    assert!(fail(&breaker).is_err());
    assert_eq!(breaker.state(), State::Open);
    assert!(breaker.expiry_ms().is_some());
    assert_eq!(breaker.counts(), Counts::default());

    clock.advance(6_000);
    assert!(succeed(&breaker).is_ok());
    assert_eq!(breaker.state(), State::HalfOpen);
    assert_eq!(breaker.expiry_ms(), None);
    assert_eq!(breaker.counts(), counts(1, 1, 0, 1, 0));

    // half-open -> closed, consecutive successes (5) >= max requests (5)
    for _ in 0..4 {
        assert!(succeed(&breaker).is_ok());
    }
    assert_eq!(breaker.state(), State::Closed);
    assert_eq!(breaker.counts(), Counts::default());
    assert_eq!(breaker.expiry_ms(), None);
}

#[test]
fn expiry_lies_in_the_future() {
    let clock = Arc::new(ModifiedTimeProvider::new());
    let breaker = CircuitBreaker::new(Settings {
        timeout: Duration::from_secs(5),
        time_provider: clock.clone(),
        ..Default::default()
    });
    let before = sentinel_breaker::utils::curr_time_millis();
    for _ in 0..6 {
        assert!(fail(&breaker).is_err());
    }
    let expiry = breaker.expiry_ms().unwrap();
    assert!(expiry >= before + 5_000);
    assert!(expiry <= sentinel_breaker::utils::curr_time_millis() + 5_000);
}

#[test]
fn random_outcomes_keep_counts_consistent() {
    let clock = Arc::new(ModifiedTimeProvider::new());
    let breaker = CircuitBreaker::new(Settings {
        max_requests: 3,
        timeout: Duration::from_millis(500),
        time_provider: clock.clone(),
        ..Default::default()
    });
    for _ in 0..2_000 {
        let res = if rand::random::<u8>() % 4 == 0 {
            succeed(&breaker)
        } else {
            fail(&breaker)
        };
        if let Err(err) = res {
            if err.downcast_ref::<BreakerError>().is_some() {
                clock.advance(rand::random::<u64>() % 1_000);
            }
        }
        let c = breaker.counts();
        assert_eq!(c.requests, c.total_successes + c.total_failures);
        assert!(c.consecutive_successes == 0 || c.consecutive_failures == 0);
        match breaker.state() {
            State::Open => assert!(breaker.expiry_ms().is_some()),
            _ => assert!(breaker.expiry_ms().is_none()),
        }
        if breaker.state() == State::HalfOpen {
            assert!(c.requests <= 3);
        }
    }
}

#[test]
fn concurrent_probes_respect_the_cap() {
    const CALLERS: usize = 12;
    let clock = Arc::new(ModifiedTimeProvider::new());
    let breaker = Arc::new(CircuitBreaker::new(Settings {
        name: "concurrent".into(),
        max_requests: 5,
        timeout: Duration::from_secs(1),
        time_provider: clock.clone(),
        ..Default::default()
    }));
    for _ in 0..6 {
        assert!(fail(&breaker).is_err());
    }
    assert_eq!(breaker.state(), State::Open);
    clock.advance(2_000);

    let admitted = Arc::new(AtomicUsize::new(0));
    let rejected = Arc::new(AtomicUsize::new(0));
    // admitted probes park here until every caller went through admission
    let gate = Arc::new((Mutex::new(false), Condvar::new()));
    let start = Arc::new(Barrier::new(CALLERS));

    let mut handlers = Vec::new();
    for _ in 0..CALLERS {
        let breaker = Arc::clone(&breaker);
        let admitted = Arc::clone(&admitted);
        let rejected = Arc::clone(&rejected);
        let gate = Arc::clone(&gate);
        let start = Arc::clone(&start);
        handlers.push(thread::spawn(move || {
            start.wait();
            let res = breaker.execute(|| {
                admitted.fetch_add(1, Ordering::SeqCst);
                let (open, cvar) = &*gate;
                let mut open = open.lock().unwrap();
                while !*open {
                    open = cvar.wait(open).unwrap();
                }
                Ok(())
            });
            if let Err(err) = res {
                assert_eq!(
                    err.downcast_ref::<BreakerError>(),
                    Some(&BreakerError::TooManyRequests)
                );
                rejected.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }

    while admitted.load(Ordering::SeqCst) + rejected.load(Ordering::SeqCst) < CALLERS {
        thread::sleep(Duration::from_millis(1));
    }
    assert_eq!(admitted.load(Ordering::SeqCst), 5);
    assert_eq!(rejected.load(Ordering::SeqCst), CALLERS - 5);
    assert_eq!(breaker.state(), State::HalfOpen);
    assert_eq!(breaker.counts().requests, 5);

    {
        let (open, cvar) = &*gate;
        *open.lock().unwrap() = true;
        cvar.notify_all();
    }
    for h in handlers {
        h.join().expect("Couldn't join on the associated thread");
    }
    assert_eq!(breaker.state(), State::Closed);
    assert_eq!(breaker.counts(), Counts::default());
}
