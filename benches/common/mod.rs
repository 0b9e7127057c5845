use rand::Rng;

const MAKES: &[(&str, &str)] = &[
    ("Toyota", "Corolla"),
    ("Toyota", "Hilux"),
    ("Mercedes", "Benz"),
    ("Land", "Rover"),
    ("Mazda", "CX-5"),
    ("Ford", "Ranger"),
    ("Honda", "CBR500R"),
];
const LOCATIONS: &[&str] = &["Sydney", "Melbourne", "Perth", "Brisbane", "?"];
const TRANSMISSIONS: &[&str] = &["Automatic", "Manual", "CVT", "?"];

/// Synthetic sold-cars dump, one JSON object per line
pub fn sold_cars_ndjson(count: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut out = String::with_capacity(count * 220);
    for i in 0..count {
        let (make, model) = MAKES[rng.gen_range(0..MAKES.len())];
        let variant = if model == "CBR500R" { "Sports Motorcycle" } else { "Base" };
        let odometer = rng.gen_range(0..300_000u32);
        out.push_str(&format!(
            concat!(
                "{{\"make\":\"{}\",\"model\":\"{}\",\"variant\":\"{}\",\"year\":{},",
                "\"price\":{},\"bids\":{},\"Location\":\"{}\",\"Transmission\":\"{}\",",
                "\"Indicated Odometer Reading\":\"{},{:03}\",\"Engine Capacity\":\"{:.1}\",",
                "\"url\":\"https://auction.example/lot/{}\"}}\n"
            ),
            make,
            model,
            variant,
            rng.gen_range(1995..2025u32),
            rng.gen_range(500..90_000u32),
            rng.gen_range(0..40u32),
            LOCATIONS[rng.gen_range(0..LOCATIONS.len())],
            TRANSMISSIONS[rng.gen_range(0..TRANSMISSIONS.len())],
            odometer / 1000,
            odometer % 1000,
            rng.gen_range(1.0..5.0f64),
            i,
        ));
    }
    out
}
