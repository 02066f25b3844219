//! Fixed recommendation catalog. Every call returns the same entries in
//! the same order; daily plans pick from it by position.

use crate::recommendations::repo_types::{Difficulty, Exercise, Meal};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn meals() -> Vec<Meal> {
    vec![
        Meal {
            id: "1".into(),
            name: "Chicken salad with avocado".into(),
            description: "A protein-rich salad with healthy fats and few carbohydrates.".into(),
            calories: 350,
            protein: 30,
            carbs: 15,
            fat: 20,
            image_url: "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?auto=format&fit=crop&w=500&q=60".into(),
            ingredients: strings(&[
                "150g grilled chicken breast",
                "1 medium avocado",
                "2 cups mixed lettuce",
                "1 medium tomato",
                "1 tablespoon olive oil",
                "Lemon juice to taste",
                "Salt and pepper to taste",
            ]),
            instructions: strings(&[
                "Grill the chicken breast with a little salt and pepper.",
                "Wash and chop the lettuce and tomato.",
                "Dice the avocado.",
                "Mix everything in a bowl.",
                "Dress with olive oil, lemon juice, salt and pepper.",
            ]),
            tags: strings(&["high protein", "low carb", "healthy"]),
        },
        Meal {
            id: "2".into(),
            name: "Baked salmon with vegetables".into(),
            description: "A dish rich in omega-3 fatty acids and high quality protein.".into(),
            calories: 420,
            protein: 35,
            carbs: 10,
            fat: 25,
            image_url: "https://images.unsplash.com/photo-1467003909585-2f8a72700288?auto=format&fit=crop&w=500&q=60".into(),
            ingredients: strings(&[
                "180g salmon fillet",
                "1 medium zucchini",
                "1 red bell pepper",
                "1 medium onion",
                "2 tablespoons olive oil",
                "Lemon juice",
                "Herbs (thyme, rosemary)",
                "Salt and pepper to taste",
            ]),
            instructions: strings(&[
                "Preheat the oven to 180°C.",
                "Slice the vegetables into medium pieces.",
                "Place the salmon and vegetables on a baking tray.",
                "Drizzle with olive oil and lemon juice, season with salt, pepper and herbs.",
                "Bake for 20-25 minutes until the salmon is cooked.",
            ]),
            tags: strings(&["omega-3", "low carb", "high protein"]),
        },
        Meal {
            id: "3".into(),
            name: "Green protein smoothie".into(),
            description: "A nutritious smoothie for breakfast or after a workout.".into(),
            calories: 250,
            protein: 20,
            carbs: 25,
            fat: 8,
            image_url: "https://images.unsplash.com/photo-1556881286-fc6915169721?auto=format&fit=crop&w=500&q=60".into(),
            ingredients: strings(&[
                "1 scoop unflavoured whey protein",
                "1 medium banana",
                "1 handful of spinach",
                "1 tablespoon almond butter",
                "250ml unsweetened almond milk",
                "Ice to taste",
            ]),
            instructions: strings(&[
                "Add all the ingredients to a blender.",
                "Blend until smooth.",
                "Serve immediately.",
            ]),
            tags: strings(&["high protein", "post-workout", "breakfast"]),
        },
    ]
}

pub fn exercises() -> Vec<Exercise> {
    vec![
        Exercise {
            id: "1".into(),
            name: "Low intensity walk".into(),
            description: "A moderate-pace walk, a good first step for beginners.".into(),
            video_url: "https://www.youtube.com/watch?v=example1".into(),
            duration: 30,
            calories_burned: 150,
            difficulty: Difficulty::Beginner,
            tags: strings(&["cardio", "low impact", "beginner"]),
        },
        Exercise {
            id: "2".into(),
            name: "Water aerobics".into(),
            description: "A pool routine that takes the load off the joints.".into(),
            video_url: "https://www.youtube.com/watch?v=example2".into(),
            duration: 45,
            calories_burned: 300,
            difficulty: Difficulty::Beginner,
            tags: strings(&["aquatic", "low impact", "joints"]),
        },
        Exercise {
            id: "3".into(),
            name: "Beginner yoga".into(),
            description: "An adapted yoga routine for flexibility and balance.".into(),
            video_url: "https://www.youtube.com/watch?v=example3".into(),
            duration: 20,
            calories_burned: 120,
            difficulty: Difficulty::Beginner,
            tags: strings(&["yoga", "flexibility", "relaxation"]),
        },
        Exercise {
            id: "4".into(),
            name: "Chair strength training".into(),
            description: "Strength exercises using a chair for support.".into(),
            video_url: "https://www.youtube.com/watch?v=example4".into(),
            duration: 25,
            calories_burned: 180,
            difficulty: Difficulty::Beginner,
            tags: strings(&["strength", "chair", "toning"]),
        },
    ]
}
