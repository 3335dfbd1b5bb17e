// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

/// BlazePose skeleton structure (pairs of landmark indices)
/// Defines which landmarks connect to form the 33-point pose skeleton
pub const POSE_CONNECTIONS: [[usize; 2]; 35] = [
    [0, 1],   // nose to left eye inner
    [1, 2],   // left eye inner to left eye
    [2, 3],   // left eye to left eye outer
    [3, 7],   // left eye outer to left ear
    [0, 4],   // nose to right eye inner
    [4, 5],   // right eye inner to right eye
    [5, 6],   // right eye to right eye outer
    [6, 8],   // right eye outer to right ear
    [9, 10],  // mouth
    [11, 12], // shoulders
    [11, 13], // left shoulder to left elbow
    [13, 15], // left elbow to left wrist
    [15, 17], // left wrist to left pinky
    [15, 19], // left wrist to left index
    [15, 21], // left wrist to left thumb
    [17, 19], // left pinky to left index
    [12, 14], // right shoulder to right elbow
    [14, 16], // right elbow to right wrist
    [16, 18], // right wrist to right pinky
    [16, 20], // right wrist to right index
    [16, 22], // right wrist to right thumb
    [18, 20], // right pinky to right index
    [11, 23], // left shoulder to left hip
    [12, 24], // right shoulder to right hip
    [23, 24], // hips
    [23, 25], // left hip to left knee
    [24, 26], // right hip to right knee
    [25, 27], // left knee to left ankle
    [26, 28], // right knee to right ankle
    [27, 29], // left ankle to left heel
    [28, 30], // right ankle to right heel
    [29, 31], // left heel to left foot index
    [30, 32], // right heel to right foot index
    [27, 31], // left ankle to left foot index
    [28, 32], // right ankle to right foot index
];

/// Connection color indices mapping to `POSE_COLORS`
/// Mapping: face=green, torso=magenta, left side=orange, right side=blue
pub const CONNECTION_COLOR_INDICES: [usize; 35] = [
    16, 16, 16, 16, 16, 16, 16, 16, 16, // face
    7, // shoulders
    0, 0, 0, 0, 0, 0, // left arm
    9, 9, 9, 9, 9, 9, // right arm
    7, 7, 7, // torso
    0, 9, 0, 9, 0, 9, 0, 9, 0, 9, // legs
];
