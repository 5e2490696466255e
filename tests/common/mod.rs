#![allow(dead_code)]

use agrinext::{FeatureSchema, TaskKind, TrainingSample, samples_from_table};

const CROP_CSV: &str = "\
N,P,K,temperature,humidity,ph,rainfall,label
90,42,43,20.879744,82.002744,6.502985,202.935536,rice
85,58,41,21.770462,80.319644,7.038096,226.655537,rice
60,55,44,23.004459,82.320763,7.840207,263.964248,rice
74,35,40,26.491096,80.158363,6.980401,242.864034,rice
78,42,42,20.130175,81.604873,7.628473,262.717340,rice
71,54,16,22.613600,63.690706,5.749914,87.759539,maize
61,44,17,26.100184,71.574769,6.931757,102.266244,maize
80,43,16,23.558821,71.593514,6.657965,66.719955,maize
73,58,21,19.972160,57.682729,6.596061,60.651715,maize
40,72,77,17.024985,16.988612,7.485996,88.551231,chickpea
23,72,84,19.020613,17.131591,6.920251,79.926981,chickpea
39,58,85,17.887765,15.405897,5.996932,68.549329,chickpea
22,72,85,18.868056,15.658092,6.391174,88.510490,chickpea
13,60,25,17.136928,20.595417,5.685972,128.256862,kidneybeans
25,70,16,19.634743,18.907056,5.759237,106.359818,kidneybeans
91,94,46,29.367924,76.249001,6.149934,92.828409,banana
105,95,50,27.333690,83.676752,5.849076,101.049479,banana
108,92,53,27.400536,82.962213,6.276800,104.937800,banana
";

fn parse(csv: &str, task: TaskKind) -> (FeatureSchema, Vec<TrainingSample>) {
    let mut lines = csv.lines().map(|l| l.split(',').collect::<Vec<_>>());
    let header = lines.next().expect("table has a header");
    let rows: Vec<Vec<&str>> = lines.collect();
    samples_from_table(&header, &rows, task).expect("table parses")
}

pub fn crop_table() -> (FeatureSchema, Vec<TrainingSample>) {
    parse(CROP_CSV, TaskKind::Classification)
}

/// `month,year,rainfall,wpi` where the index only follows the month.
pub fn wpi_table() -> (FeatureSchema, Vec<TrainingSample>) {
    let mut csv = String::from("month,year,rainfall,wpi\n");
    for year in 2019..=2023 {
        for (i, rain) in agrinext::tasks::ANNUAL_RAINFALL.iter().enumerate() {
            let month = i + 1;
            csv.push_str(&format!("{month},{year},{rain},{}\n", 100 + 2 * month));
        }
    }
    parse(&csv, TaskKind::Regression)
}
