use crate::core::TrainingSample;
use crate::tasks::ANNUAL_RAINFALL;

/// `N, P, K, temperature, humidity, ph, rainfall, label`
const CROP_ROWS: &[([f64; 7], &str)] = &[
    ([90.0, 42.0, 43.0, 20.879744, 82.002744, 6.502985, 202.935536], "rice"),
    ([85.0, 58.0, 41.0, 21.770462, 80.319644, 7.038096, 226.655537], "rice"),
    ([60.0, 55.0, 44.0, 23.004459, 82.320763, 7.840207, 263.964248], "rice"),
    ([74.0, 35.0, 40.0, 26.491096, 80.158363, 6.980401, 242.864034], "rice"),
    ([78.0, 42.0, 42.0, 20.130175, 81.604873, 7.628473, 262.717340], "rice"),
    ([71.0, 54.0, 16.0, 22.613600, 63.690706, 5.749914, 87.759539], "maize"),
    ([61.0, 44.0, 17.0, 26.100184, 71.574769, 6.931757, 102.266244], "maize"),
    ([80.0, 43.0, 16.0, 23.558821, 71.593514, 6.657965, 66.719955], "maize"),
    ([73.0, 58.0, 21.0, 19.972160, 57.682729, 6.596061, 60.651715], "maize"),
    ([61.0, 38.0, 20.0, 18.478913, 62.695039, 5.970458, 65.438354], "maize"),
    ([40.0, 72.0, 77.0, 17.024985, 16.988612, 7.485996, 88.551231], "chickpea"),
    ([23.0, 72.0, 84.0, 19.020613, 17.131591, 6.920251, 79.926981], "chickpea"),
    ([39.0, 58.0, 85.0, 17.887765, 15.405897, 5.996932, 68.549329], "chickpea"),
    ([22.0, 72.0, 85.0, 18.868056, 15.658092, 6.391174, 88.510490], "chickpea"),
    ([36.0, 67.0, 77.0, 18.369526, 19.563810, 7.152811, 79.263577], "chickpea"),
    ([13.0, 60.0, 25.0, 17.136928, 20.595417, 5.685972, 128.256862], "kidneybeans"),
    ([25.0, 70.0, 16.0, 19.634743, 18.907056, 5.759237, 106.359818], "kidneybeans"),
    ([31.0, 55.0, 22.0, 22.913502, 21.339531, 5.873172, 109.225556], "kidneybeans"),
    ([91.0, 94.0, 46.0, 29.367924, 76.249001, 6.149934, 92.828409], "banana"),
    ([105.0, 95.0, 50.0, 27.333690, 83.676752, 5.849076, 101.049479], "banana"),
    ([108.0, 92.0, 53.0, 27.400536, 82.962213, 6.276800, 104.937800], "banana"),
];

/// A small slice of crop recommendation data with five crops.
pub fn crop_samples() -> Vec<TrainingSample> {
    CROP_ROWS
        .iter()
        .map(|(features, label)| TrainingSample::labelled(features.to_vec(), *label))
        .collect()
}

/// Synthetic `month, year, rainfall -> WPI` rows for 2019..=2023 where the
/// index depends only on the month: `100 + 2 * month`.
pub fn wpi_samples() -> Vec<TrainingSample> {
    (2019..=2023)
        .flat_map(|year| {
            (1..=12).map(move |month| {
                TrainingSample::valued(
                    vec![month as f64, year as f64, ANNUAL_RAINFALL[month - 1]],
                    100.0 + 2.0 * month as f64,
                )
            })
        })
        .collect()
}
