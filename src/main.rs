mod github;
mod log;
mod model;
mod store;
mod telemetry;

use std::io::{self, Write};

use model::{CardFlow, LoveMeter, MusicPlayer, Panel};
use telemetry::Telemetry;

fn valentine_name() -> String {
    std::env::var("VALENTINE_NAME").unwrap_or_else(|_| "My Love".to_string())
}

/// Print a prompt and read one trimmed line. EOF reads as "quit" so a
/// closed stdin ends the card instead of spinning.
fn prompt(text: &str) -> String {
    print!("{} ", text);
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => "quit".to_string(),
        Ok(_) => line.trim().to_string(),
    }
}

fn print_logs() {
    let snapshot = log::app_logs_snapshot();
    if snapshot.is_empty() {
        println!("(no diagnostics yet)");
        return;
    }
    for entry in snapshot {
        println!("{} {:5} {}", entry.time, entry.level, entry.message);
    }
}

fn toggle_music(music: &mut MusicPlayer, telemetry: &mut Telemetry, flow: &CardFlow) {
    let label = music.toggle();
    telemetry.record("MUSIC", label, flow);
    if music.is_playing() {
        println!("🎵 La la la...");
    } else {
        println!("🔇 (silence)");
    }
}

fn print_dodge() {
    println!("The NO button scurries away before you can press it! 💨");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let mut flow = CardFlow::new();
    let mut meter = LoveMeter::new();
    let mut music = MusicPlayer::new();
    let mut telemetry = Telemetry::new();

    let earlier = store::load_interactions();
    if !earlier.is_empty() {
        log::app_log(
            "INFO",
            format!("Local mirror holds {} interactions from earlier sessions", earlier.len()),
        );
    }

    telemetry.record("PAGE_LOAD", "Website opened", &flow);

    println!("💝 {}, my love...", valentine_name());
    println!("(type 'music', 'logs' or 'quit' at any prompt)");
    println!();

    loop {
        match flow.visible() {
            Some(Panel::Question1) => {
                println!("Do you like me? [yes / no / secret]");
                match prompt(">").to_lowercase().as_str() {
                    "yes" | "y" => {
                        telemetry.record("CLICK", "YES Button - Question 1", &flow);
                        flow.show(Panel::Question2);
                    }
                    "no" | "n" => {
                        telemetry.record("CLICK", "NO Button - Question 1 (Moved away)", &flow);
                        print_dodge();
                    }
                    "secret" | "s" => {
                        telemetry.record("CLICK", "Secret Answer Button", &flow);
                        println!("...I knew it all along. 😏");
                        flow.show(Panel::Question2);
                    }
                    "music" | "m" => toggle_music(&mut music, &mut telemetry, &flow),
                    "logs" | "l" => print_logs(),
                    "quit" | "q" => break,
                    _ => println!("It's a simple question... [yes / no / secret]"),
                }
            }
            Some(Panel::Question2) => {
                println!(
                    "How much do you love me? (0-{}, currently {}%; 'next' when you're sure)",
                    model::LOVE_METER_MAX,
                    meter.value()
                );
                let input = prompt(">").to_lowercase();
                if let Ok(value) = input.parse::<u32>() {
                    meter.set(value);
                    telemetry.record("METER", &meter.event_label(), &flow);
                    if let Some(tier) = meter.tier() {
                        println!("{}", tier.message());
                    }
                } else {
                    match input.as_str() {
                        "next" | "n" => {
                            telemetry.record("CLICK", "NEXT Button - Question 2", &flow);
                            flow.show(Panel::Question3);
                        }
                        "music" | "m" => toggle_music(&mut music, &mut telemetry, &flow),
                        "logs" | "l" => print_logs(),
                        "quit" | "q" => break,
                        _ => println!("Give me a number, or 'next'."),
                    }
                }
            }
            Some(Panel::Question3) => {
                println!("Will you be my Valentine? [yes / no]");
                match prompt(">").to_lowercase().as_str() {
                    "yes" | "y" => {
                        telemetry.record("CLICK", "🎉 YES BUTTON - FINAL ANSWER - SAID YES!", &flow);
                        flow.celebrate();
                    }
                    "no" | "n" => {
                        telemetry.record("CLICK", "NO Button - Question 3 (Moved away)", &flow);
                        print_dodge();
                    }
                    "music" | "m" => toggle_music(&mut music, &mut telemetry, &flow),
                    "logs" | "l" => print_logs(),
                    "quit" | "q" => break,
                    _ => println!("It's the big one... [yes / no]"),
                }
            }
            Some(Panel::Celebration) => {
                println!();
                println!("YES!!! 🎉💖");
                println!("You've made me the happiest person alive!");
                println!("💖💘💝💕🥰😍🎉");
                break;
            }
            None => break,
        }
    }

    // Let in-flight GitHub appends finish before the process dies.
    telemetry.drain().await;
    println!();
    println!("({} interactions recorded this session)", telemetry.interactions().len());
}
