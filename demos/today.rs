use chrono::Utc;
use miqat::{calculate_qibla, distance_to_kaaba, ClockTime, Preferences, PrayerNotifier};

fn main() {
    let prefs = Preferences::default();
    let now = Utc::now();
    let mut notifier = PrayerNotifier::new(prefs.clone());

    println!("{} ({})", prefs.location_name, prefs.coordinates);
    println!("Hijri: {}", notifier.hijri_date(now));
    print!("{}", notifier.times(now));

    let local = prefs.calculator().local_time(now);
    match notifier.next_prayer(now) {
        Some((prayer, at)) => println!("Next: {prayer} at {at}"),
        None => println!("Next: fajr tomorrow (now {})", ClockTime::from(local.time())),
    }
    println!("Qibla: {:.2}°", calculate_qibla(prefs.coordinates).value());
    println!("Distance to Kaaba: {:.0} km", distance_to_kaaba(prefs.coordinates));
}
