//! Integration tests for spektro-analyser.
//!
//! Exercises the public `Analyser` API end to end with synthetic signals:
//! availability rules, exact time-domain identity and quantization, the
//! smoothing contract, reset semantics, and concurrent use.

use std::f32::consts::PI;
use std::sync::Arc;
use std::thread;

use spektro_analyser::{
    Analyser, AnalyserError, AnalyserOptions, DecibelScale, MAX_FFT_SIZE, magnitude_to_db,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn options(fft_size: usize, smoothing: f32) -> AnalyserOptions {
    AnalyserOptions {
        fft_size,
        smoothing_time_constant: smoothing,
        ..AnalyserOptions::default()
    }
}

/// Sine centred exactly on `bin` for a frame of `fft_size` samples.
fn bin_sine(bin: usize, fft_size: usize, len: usize, amplitude: f32) -> Vec<f32> {
    (0..len)
        .map(|i| amplitude * (2.0 * PI * bin as f32 * i as f32 / fft_size as f32).sin())
        .collect()
}

/// Deterministic pseudo-noise in [-1, 1].
fn noise(len: usize, seed: u32) -> Vec<f32> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as i32 as f32) / (i32::MAX as f32)
        })
        .collect()
}

// ===========================================================================
// 1. Construction
// ===========================================================================

#[test]
fn rejects_non_power_of_two_fft_size() {
    let err = Analyser::new(AnalyserOptions::with_fft_size(100)).unwrap_err();
    assert_eq!(err, AnalyserError::InvalidFftSize(100));
}

#[test]
fn rejects_empty_decibel_range() {
    let err = Analyser::new(AnalyserOptions {
        min_decibels: 0.0,
        max_decibels: 0.0,
        ..AnalyserOptions::default()
    })
    .unwrap_err();
    assert!(matches!(err, AnalyserError::InvalidDecibelRange { .. }));
}

#[test]
fn rejects_smoothing_above_one() {
    let err = Analyser::new(options(2048, 1.5)).unwrap_err();
    assert_eq!(err, AnalyserError::InvalidSmoothing(1.5));
}

#[test]
fn every_supported_size_constructs() {
    for shift in 5..=15 {
        let size = 1usize << shift;
        let analyser = Analyser::new(AnalyserOptions::with_fft_size(size)).unwrap();
        assert_eq!(analyser.frequency_bin_count(), size / 2);
    }
}

// ===========================================================================
// 2. Availability
// ===========================================================================

#[test]
fn no_input_means_no_data() {
    let analyser = Analyser::new(AnalyserOptions::default()).unwrap();
    assert!(analyser.time_domain_data().is_none());
    assert!(analyser.frequency_data().is_none());
}

#[test]
fn half_frame_is_not_enough() {
    let analyser = Analyser::new(AnalyserOptions::with_fft_size(2048)).unwrap();
    analyser.update(&noise(1024, 1));
    assert!(analyser.time_domain_data().is_none());
    assert!(analyser.frequency_data().is_none());
}

#[test]
fn one_sample_short_then_complete() {
    let fft_size = 256;
    let analyser = Analyser::new(AnalyserOptions::with_fft_size(fft_size)).unwrap();

    // Arrive in uneven blocks.
    analyser.update(&[0.25; 100]);
    analyser.update(&[0.25; 155]);
    assert!(analyser.time_domain_data().is_none());
    assert!(analyser.frequency_data().is_none());

    analyser.update(&[0.25]);
    assert!(analyser.time_domain_data().is_some());
    assert!(analyser.frequency_data().is_some());
}

// ===========================================================================
// 3. Time domain
// ===========================================================================

#[test]
fn time_domain_is_latest_samples_verbatim() {
    let analyser = Analyser::new(AnalyserOptions::default()).unwrap();
    let signal = noise(5000, 7);
    for block in signal.chunks(512) {
        analyser.update(block);
    }

    let data = analyser.time_domain_data().unwrap();
    assert_eq!(data.float_values.len(), 2048);
    assert_eq!(data.float_values.as_slice(), &signal[5000 - 2048..]);
}

#[test]
fn time_domain_bytes_follow_formula() {
    let analyser = Analyser::new(AnalyserOptions::with_fft_size(32)).unwrap();
    let mut block = vec![0.0; 32];
    block[0] = -1.0;
    block[1] = 1.0;
    block[2] = 0.0;
    block[3] = -2.0;
    block[4] = 0.999;
    block[5] = -0.25;
    analyser.update(&block);

    let data = analyser.time_domain_data().unwrap();
    assert_eq!(&data.uint8_values[..6], &[0, 255, 128, 0, 255, 96]);
    for (x, b) in data.float_values.iter().zip(&data.uint8_values) {
        let expected = (128.0 * (1.0 + x)).floor().clamp(0.0, 255.0) as u8;
        assert_eq!(*b, expected, "sample {x}");
    }
}

#[test]
fn largest_fft_sees_last_32768_after_overflow() {
    let analyser = Analyser::new(AnalyserOptions::with_fft_size(MAX_FFT_SIZE)).unwrap();
    let signal: Vec<f32> = (0..40_000).map(|i| i as f32 * 1e-5).collect();
    for block in signal.chunks(4096) {
        analyser.update(block);
    }
    assert_eq!(analyser.buffered_len(), MAX_FFT_SIZE);

    let data = analyser.time_domain_data().unwrap();
    assert_eq!(data.float_values.as_slice(), &signal[40_000 - MAX_FFT_SIZE..]);
}

// ===========================================================================
// 4. Frequency domain
// ===========================================================================

#[test]
fn frequency_lengths_equal_bin_count() {
    for fft_size in [32, 1024, 4096] {
        let analyser = Analyser::new(AnalyserOptions::with_fft_size(fft_size)).unwrap();
        analyser.update(&noise(fft_size, 3));
        let data = analyser.frequency_data().unwrap();
        assert_eq!(data.uint8_values.len(), fft_size / 2);
        assert_eq!(data.float_values.len(), fft_size / 2);
    }
}

#[test]
fn bin_centred_sine_peaks_at_its_bin() {
    let fft_size = 2048;
    let bin = 100;
    let analyser = Analyser::new(options(fft_size, 0.0)).unwrap();
    analyser.update(&bin_sine(bin, fft_size, fft_size, 1.0));

    let data = analyser.frequency_data().unwrap();
    let (peak, level) = data
        .float_values
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        .unwrap();
    assert_eq!(peak, bin);

    // Unit sine, Blackman coherent gain 0.42: |X|/N = 0.42 / 2.
    let expected = 20.0 * (0.42f32 / 2.0).log10();
    assert!(
        (level - expected).abs() < 0.5,
        "peak level {level} dB, expected about {expected} dB"
    );
}

#[test]
fn silence_maps_to_floor() {
    let analyser = Analyser::new(options(512, 0.0)).unwrap();
    analyser.update(&[0.0; 512]);
    let data = analyser.frequency_data().unwrap();
    let floor = magnitude_to_db(0.0);
    assert!(data.float_values.iter().all(|&db| db == floor));
    assert!(data.uint8_values.iter().all(|&b| b == 0));
}

#[test]
fn nyquist_energy_not_folded_into_dc_bin() {
    // Alternating samples are pure Nyquist. With the packed term dropped, the
    // DC bin stays near silence; windowing only leaks into the top bins.
    let analyser = Analyser::new(options(64, 0.0)).unwrap();
    let alternating: Vec<f32> = (0..64).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
    analyser.update(&alternating);
    let data = analyser.frequency_data().unwrap();
    assert!(data.float_values[0] < -100.0, "bin 0 = {}", data.float_values[0]);
}

#[test]
fn bytes_follow_decibel_formula() {
    let opts = AnalyserOptions {
        fft_size: 1024,
        min_decibels: -90.0,
        max_decibels: -10.0,
        smoothing_time_constant: 0.0,
    };
    let analyser = Analyser::new(opts).unwrap();
    analyser.update(&noise(1024, 11));
    let data = analyser.frequency_data().unwrap();

    let scale = DecibelScale::new(-90.0, -10.0);
    for (db, b) in data.float_values.iter().zip(&data.uint8_values) {
        let expected = (255.0 / (-10.0f32 - -90.0) * (db - -90.0))
            .floor()
            .clamp(0.0, 255.0) as u8;
        assert_eq!(*b, expected, "dB {db}");
        assert_eq!(*b, scale.to_byte(*db));
    }
}

// ===========================================================================
// 5. Smoothing
// ===========================================================================

#[test]
fn zero_smoothing_is_idempotent_per_frame() {
    let analyser = Analyser::new(options(1024, 0.0)).unwrap();
    let block = noise(1024, 5);

    analyser.update(&block);
    let first = analyser.frequency_data().unwrap();
    analyser.update(&block);
    let second = analyser.frequency_data().unwrap();

    assert_eq!(first, second);
}

#[test]
fn full_smoothing_after_reset_stays_at_floor() {
    let opts = options(2048, 1.0);
    let analyser = Analyser::new(opts).unwrap();
    analyser.update(&noise(4096, 9));
    let _ = analyser.frequency_data();
    analyser.reset();

    analyser.update(&bin_sine(40, 2048, 2048, 0.9));
    let data = analyser.frequency_data().unwrap();

    let floor_db = 20.0 * 1e-20f32.log10();
    let scale = DecibelScale::new(opts.min_decibels, opts.max_decibels);
    for (db, b) in data.float_values.iter().zip(&data.uint8_values) {
        assert_eq!(*db, floor_db);
        assert_eq!(*b, scale.to_byte(floor_db));
    }
}

#[test]
fn smoothing_decays_after_signal_stops() {
    let fft_size = 512;
    let bin = 32;
    let analyser = Analyser::new(options(fft_size, 0.8)).unwrap();

    analyser.update(&bin_sine(bin, fft_size, fft_size, 1.0));
    let loud = analyser.frequency_data().unwrap().float_values[bin];

    let mut previous = loud;
    for _ in 0..5 {
        analyser.update(&vec![0.0; fft_size]);
        let level = analyser.frequency_data().unwrap().float_values[bin];
        // Each silent frame multiplies the magnitude by 0.8 (about -1.94 dB).
        assert!(
            (level - (previous + 20.0 * 0.8f32.log10())).abs() < 1e-2,
            "level {level}, previous {previous}"
        );
        previous = level;
    }
}

#[test]
fn repeated_queries_return_same_frame() {
    let analyser = Analyser::new(options(256, 0.8)).unwrap();
    analyser.update(&noise(256, 2));
    let a = analyser.frequency_data().unwrap();
    let b = analyser.frequency_data().unwrap();
    let c = analyser.time_domain_data().unwrap();
    let d = analyser.time_domain_data().unwrap();
    assert_eq!(a, b);
    assert_eq!(c, d);
}

// ===========================================================================
// 6. Reset
// ===========================================================================

#[test]
fn reset_hides_previous_results() {
    let analyser = Analyser::new(AnalyserOptions::with_fft_size(128)).unwrap();
    analyser.update(&noise(128, 4));
    assert!(analyser.time_domain_data().is_some());
    assert!(analyser.frequency_data().is_some());

    analyser.reset();
    assert!(analyser.time_domain_data().is_none());
    assert!(analyser.frequency_data().is_none());

    analyser.update(&noise(127, 4));
    assert!(analyser.time_domain_data().is_none());
    analyser.update(&[0.0]);
    assert!(analyser.time_domain_data().is_some());
    assert!(analyser.frequency_data().is_some());
}

#[test]
fn reset_restores_fresh_smoothing() {
    let block = noise(512, 8);

    let fresh = Analyser::new(options(512, 0.6)).unwrap();
    fresh.update(&block);
    let expected = fresh.frequency_data().unwrap();

    let reused = Analyser::new(options(512, 0.6)).unwrap();
    reused.update(&bin_sine(20, 512, 512, 1.0));
    let _ = reused.frequency_data();
    reused.reset();
    reused.update(&block);

    assert_eq!(reused.frequency_data().unwrap(), expected);
}

// ===========================================================================
// 7. Concurrency
// ===========================================================================

#[test]
fn producer_and_consumers_share_analyser() {
    let analyser = Arc::new(Analyser::new(AnalyserOptions::with_fft_size(1024)).unwrap());

    let producer = {
        let analyser = Arc::clone(&analyser);
        thread::spawn(move || {
            for seed in 1..200u32 {
                analyser.update(&noise(256, seed));
            }
        })
    };

    let consumers: Vec<_> = (0..2)
        .map(|_| {
            let analyser = Arc::clone(&analyser);
            thread::spawn(move || {
                for _ in 0..200 {
                    if let Some(data) = analyser.frequency_data() {
                        assert_eq!(data.float_values.len(), 512);
                        assert_eq!(data.uint8_values.len(), 512);
                    }
                    if let Some(data) = analyser.time_domain_data() {
                        assert_eq!(data.float_values.len(), 1024);
                        assert_eq!(data.uint8_values.len(), 1024);
                    }
                }
            })
        })
        .collect();

    producer.join().unwrap();
    for consumer in consumers {
        consumer.join().unwrap();
    }
    assert!(analyser.frequency_data().is_some());
}

// ===========================================================================
// 8. Serialization
// ===========================================================================

#[test]
fn snapshots_serialize_to_json() {
    let analyser = Analyser::new(AnalyserOptions::with_fft_size(32)).unwrap();
    analyser.update(&[0.0; 32]);
    let data = analyser.time_domain_data().unwrap();
    let json = serde_json::to_string(&data).unwrap();
    assert!(json.contains("\"uint8_values\""));
    let back: spektro_analyser::TimeDomainData = serde_json::from_str(&json).unwrap();
    assert_eq!(back, data);
}
