// src/protocol/huffman_table.rs

// Byte frequencies of launcher traffic, indexed by byte value.
// Entries past 35 are only known to five decimals.
pub const SYMBOL_FREQUENCIES: [f32; 256] = [
    0.14473691, 0.01147017, 0.00167522, 0.03831121, 0.00356579, 0.03811315,
    0.00178254, 0.00199644, 0.00183511, 0.00225716, 0.00211240, 0.00308829,
    0.00172852, 0.00186608, 0.00215921, 0.00168891, 0.00168603, 0.00218586,
    0.00284414, 0.00161833, 0.00196043, 0.00151029, 0.00173932, 0.00218370,
    0.00934121, 0.00220530, 0.00381211, 0.00185456, 0.00194675, 0.00161977,
    0.00186680, 0.00182071, 0.06421956, 0.00537786, 0.00514019, 0.00487155,
    0.00327, 0.00221, 0.00261, 0.00416, 0.00205, 0.00258,
    0.00387, 0.00224, 0.00413, 0.00222, 0.00405, 0.00201,
    0.00431, 0.00602, 0.00890, 0.00794, 0.00744, 0.00442,
    0.00592, 0.00424, 0.00888, 0.00588, 0.00350, 0.00230,
    0.00330, 0.00420, 0.00203, 0.00370, 0.00326, 0.00593,
    0.00759, 0.00688, 0.00610, 0.00622, 0.00306, 0.00568,
    0.00619, 0.00336, 0.00786, 0.00789, 0.00262, 0.00331,
    0.00781, 0.00810, 0.00468, 0.00498, 0.00546, 0.00394,
    0.00811, 0.00473, 0.00558, 0.00630, 0.00698, 0.00374,
    0.00659, 0.00386, 0.00275, 0.00199, 0.00289, 0.00199,
    0.00282, 0.00402, 0.01025, 0.00858, 0.01233, 0.00858,
    0.00571, 0.00576, 0.00588, 0.00918, 0.01111, 0.00805,
    0.01026, 0.00495, 0.01029, 0.00630, 0.00669, 0.00808,
    0.01149, 0.01066, 0.00664, 0.01087, 0.00451, 0.01072,
    0.01037, 0.00824, 0.01151, 0.00391, 0.00317, 0.00284,
    0.00302, 0.00344, 0.00234, 0.00205, 0.00165, 0.00243,
    0.00182, 0.00161, 0.00248, 0.00249, 0.00195, 0.00174,
    0.00206, 0.00248, 0.00140, 0.00178, 0.00236, 0.00156,
    0.00166, 0.00215, 0.00232, 0.00140, 0.00249, 0.00155,
    0.00188, 0.00226, 0.00204, 0.00248, 0.00176, 0.00242,
    0.00251, 0.00217, 0.00238, 0.00193, 0.00172, 0.00234,
    0.00174, 0.00226, 0.00162, 0.00232, 0.00247, 0.00166,
    0.00258, 0.00178, 0.00150, 0.00241, 0.00180, 0.00187,
    0.00180, 0.00246, 0.00157, 0.00252, 0.00563, 0.00797,
    0.00239, 0.00244, 0.00251, 0.00231, 0.00228, 0.00523,
    0.00147, 0.00162, 0.00205, 0.00203, 0.00144, 0.00189,
    0.00148, 0.00162, 0.00142, 0.00246, 0.00212, 0.00142,
    0.00222, 0.00210, 0.00171, 0.00246, 0.00252, 0.00154,
    0.00180, 0.00249, 0.00201, 0.00208, 0.00196, 0.00234,
    0.00229, 0.00240, 0.00248, 0.00258, 0.00230, 0.00227,
    0.00160, 0.00155, 0.00169, 0.00225, 0.00170, 0.00181,
    0.00230, 0.00198, 0.00194, 0.00163, 0.00238, 0.00257,
    0.00147, 0.00174, 0.00259, 0.00227, 0.00154, 0.00244,
    0.00224, 0.00250, 0.00143, 0.00148, 0.00158, 0.00169,
    0.00221, 0.00164, 0.00164, 0.00179, 0.00249, 0.00162,
    0.00241, 0.00198, 0.00156, 0.00153, 0.00193, 0.00208,
    0.00230, 0.00190, 0.00168, 0.01190,
];
