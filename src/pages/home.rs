use leptos::prelude::*;
use serde_json::Value;

use crate::components::force_graph::{CanvasSettings, ForceGraphCanvas};
use crate::graph::{
	DEFAULT_MIN_SCORE, ForceNode, Thought, ThoughtGraph, convert, export_thoughts, prune_low_score,
};

const BRANCHES: &[&str] = &[
	"Restate the question in terms of constraints",
	"Enumerate what is already known",
	"Look for a counterexample before committing",
	"Break the problem into independent subgoals",
	"Estimate the cost of each candidate plan, then compare them against the budget and discard the ones that cannot finish in time",
	"Check the assumption against retrieved notes",
];

/// Sample graph of thoughts: a random tree rooted at a single question.
fn sample_thoughts(n: usize) -> Vec<Thought> {
	let mut thoughts = vec![Thought::new("How should the rollout be staged?").with_score(1.0)];
	for i in 1..n {
		let parent = (rand_simple(i) * i as f64) as usize;
		let text = format!("{} (step {i})", BRANCHES[i % BRANCHES.len()]);
		let thought = Thought::child(&thoughts[parent], text).with_score(rand_simple(i * 7));
		thoughts.push(thought);
	}
	thoughts
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

fn content_text(content: &Value) -> String {
	match content {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

#[component]
fn NodeDetails(node: ForceNode) -> impl IntoView {
	let title = node.name.clone().unwrap_or_else(|| node.id.to_string());
	let score = node
		.score_f64()
		.map(|s| format!("score {s:.2}"))
		.unwrap_or_else(|| "unscored".into());
	let content = node.content.as_ref().map(content_text);

	view! {
		<div class="node-details">
			<h2>{title}</h2>
			<p class="score">{score}</p>
			{content.map(|c| view! { <p class="content">{c}</p> })}
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let thoughts = StoredValue::new(export_thoughts(&sample_thoughts(80)));
	let (min_score, set_min_score) = signal(0.0_f64);
	let (hovered, set_hovered) = signal(None::<ForceNode>);

	let graph_data = Signal::derive(move || {
		let threshold = min_score.get();
		thoughts.with_value(|graph: &ThoughtGraph| convert(Some(&prune_low_score(graph, threshold))))
	});
	let on_hover = Callback::new(move |node: Option<ForceNode>| set_hovered.set(node));
	let settings = CanvasSettings {
		show_labels: false,
		..CanvasSettings::default()
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<ForceGraphCanvas
					data=graph_data
					fullscreen=true
					settings=settings
					on_hover=on_hover
				/>
				<div class="graph-overlay">
					<h1>"Graph of Thoughts"</h1>
					<p class="subtitle">"Hover a thought to inspect it. Drag nodes, scroll to zoom."</p>
					<label class="min-score">
						"Minimum score: " {move || format!("{:.2}", min_score.get())}
						<input
							type="range"
							min="0"
							max="1"
							step="0.05"
							prop:value=move || min_score.get().to_string()
							on:input=move |ev| {
								if let Ok(v) = event_target_value(&ev).parse::<f64>() {
									set_min_score.set(v);
								}
							}
						/>
					</label>
					<button on:click=move |_| set_min_score.set(DEFAULT_MIN_SCORE)>"Prune weak thoughts"</button>
					<button on:click=move |_| set_min_score.set(0.0)>"Show all"</button>
					<p class="counts">
						{move || graph_data.with(|g| format!("{} thoughts, {} links", g.nodes.len(), g.links.len()))}
					</p>
					{move || hovered.get().map(|node| view! { <NodeDetails node=node /> })}
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_is_a_single_tree() {
		let graph = convert(Some(&export_thoughts(&sample_thoughts(40))));
		assert_eq!(graph.nodes.len(), 40);
		assert_eq!(graph.links.len(), 39);
	}

	#[test]
	fn sample_scores_are_unit_range() {
		for thought in sample_thoughts(40) {
			assert!((0.0..=1.0).contains(&thought.score));
		}
	}
}
